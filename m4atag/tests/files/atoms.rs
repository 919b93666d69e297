use crate::util::{DATA_UTF8, atom, data, entry, ftyp, full_atom, mdat, mvhd, typical, untagged};

use m4atag::atom::{Atom, AtomPath, parse, serialize, write_atoms};
use m4atag::config::{ParseOptions, ParsingMode};
use m4atag::diagnostic::Diagnostic;
use m4atag::error::ErrorKind;
use m4atag::file::Mp4File;

#[test_log::test]
fn round_trip() {
	for input in [typical(), untagged()] {
		let parsed = parse(&input, ParseOptions::new()).unwrap();
		assert!(parsed.diagnostics.is_empty());

		assert_eq!(serialize(&parsed.atoms).unwrap(), input);

		let mut written = Vec::new();
		write_atoms(&mut written, &parsed.atoms).unwrap();
		assert_eq!(written, input);
	}
}

#[test_log::test]
fn idempotent_re_encode() {
	let input = typical();

	let first = serialize(&parse(&input, ParseOptions::new()).unwrap().atoms).unwrap();
	let second = serialize(&parse(&first, ParseOptions::new()).unwrap().atoms).unwrap();

	assert_eq!(first, second);
}

#[test_log::test]
fn tree_structure() {
	let parsed = parse(&typical(), ParseOptions::new()).unwrap();

	let idents = parsed.atoms.iter().map(Atom::ident).collect::<Vec<_>>();
	assert_eq!(idents, [*b"ftyp", *b"moov", *b"mdat"]);

	let ilst = AtomPath::new(1).child(1).child(0).child(1);
	let ilst = ilst.resolve(&parsed.atoms).unwrap();
	assert_eq!(ilst.ident(), *b"ilst");
	assert_eq!(ilst.children().len(), 6);

	// Leaf atoms are never decoded
	assert!(!parsed.atoms[0].is_container());
	assert!(!parsed.atoms[1].children()[0].is_container());
	assert!(!parsed.atoms[2].is_container());
}

#[test_log::test]
fn size_consistency_after_edit() {
	let mut parsed = parse(&typical(), ParseOptions::new()).unwrap();

	let title_data = AtomPath::new(1)
		.child(1)
		.child(0)
		.child(1)
		.child(0)
		.child(0);
	title_data
		.resolve_mut(&mut parsed.atoms)
		.unwrap()
		.payload_mut()
		.extend_from_slice(b" (Remastered)");

	let output = serialize(&parsed.atoms).unwrap();

	// Walk the path down, every declared size must match the computed one
	let mut path = Some(title_data);
	while let Some(current) = path {
		let atom = current.resolve(&parsed.atoms).unwrap();
		assert_eq!(atom.len(), serialize(std::slice::from_ref(atom)).unwrap().len() as u64);
		path = current.parent();
	}

	let total = parsed.atoms.iter().map(Atom::len).sum::<u64>();
	assert_eq!(total, output.len() as u64);

	let reparsed = parse(&output, ParseOptions::new()).unwrap();
	assert_eq!(reparsed.atoms, parsed.atoms);
}

#[test_log::test]
fn extended_size() {
	const LEN: u64 = 0x0010_0000;

	let mut input = ftyp();
	input.extend_from_slice(&1u32.to_be_bytes());
	input.extend_from_slice(b"mdat");
	input.extend_from_slice(&LEN.to_be_bytes());
	input.resize(input.len() + (LEN as usize - 16), 0x55);

	let parsed = parse(&input, ParseOptions::new()).unwrap();
	let mdat = &parsed.atoms[1];

	assert!(mdat.is_extended());
	assert_eq!(mdat.payload().len() as u64, LEN - 16);

	let output = serialize(&parsed.atoms).unwrap();
	assert_eq!(&output[ftyp().len()..][..16], &input[ftyp().len()..][..16]);
	assert_eq!(output, input);
}

#[test_log::test]
fn unknown_top_level_type() {
	let zzzz = atom(b"zzzz", b"junk");
	let input = typical();

	let mut first = zzzz.clone();
	first.extend_from_slice(&input);

	let mut middle = ftyp();
	middle.extend_from_slice(&zzzz);
	middle.extend_from_slice(&input[ftyp().len()..]);

	let mut last = input.clone();
	last.extend_from_slice(&zzzz);

	for input in [first, middle, last] {
		let err = parse(&input, ParseOptions::new()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::InvalidBlockType(ident) if ident == b"zzzz"));
	}
}

#[test_log::test]
fn other_known_top_level_types() {
	let input = [
		ftyp(),
		atom(b"free", &[0; 16]),
		atom(b"wide", &[]),
		atom(b"uuid", &[0xAB; 20]),
		untagged(),
		mdat(),
		atom(b"skip", &[]),
	]
	.concat();

	let parsed = parse(&input, ParseOptions::new()).unwrap();
	assert_eq!(serialize(&parsed.atoms).unwrap(), input);
}

#[test_log::test]
fn trailing_garbage() {
	let mut input = typical();
	input.extend_from_slice(&[0, 0, 0]);

	let err = parse(&input, ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::InvalidFile(_)));
}

#[test_log::test]
fn truncated_file() {
	let input = typical();

	let err = parse(&input[..input.len() - 1], ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::InvalidFile(_)));
}

// An `ilst` entry whose `data` atom claims to be larger than the entry
fn overshooting_entry() -> Vec<u8> {
	let mut bad_entry = entry(b"\xA9nam", DATA_UTF8, b"Foo title");
	bad_entry[11] += 4;

	crate::util::tagged(&[bad_entry, entry(b"\xA9ART", DATA_UTF8, b"Foo artist")])
}

#[test_log::test]
fn nested_overshoot_best_attempt() {
	let input = overshooting_entry();

	let parsed = parse(&input, ParseOptions::new()).unwrap();
	assert!(matches!(
		parsed.diagnostics.as_slice(),
		[Diagnostic::OpaqueContainer { ident, .. }] if ident == b"\xA9nam"
	));

	// Still untouched
	assert_eq!(serialize(&parsed.atoms).unwrap(), input);
}

#[test_log::test]
fn nested_overshoot_strict() {
	let input = overshooting_entry();

	let err = parse(
		&input,
		ParseOptions::new().parsing_mode(ParsingMode::Strict),
	)
	.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::InvalidFile(_)));
}

// QuickTime metadata, as written by Apple devices: `ilst` entries are named by their index into `keys`
fn keys_indexed_metadata() -> Vec<u8> {
	let hdlr = full_atom(b"hdlr", b"\0\0\0\0mdta\0\0\0\0\0\0\0\0\0\0\0\0\0");

	let key = atom(b"mdta", b"com.apple.quicktime.make");
	let keys = full_atom(b"keys", &[&1u32.to_be_bytes()[..], key.as_slice()].concat());

	let ilst = atom(
		b"ilst",
		&atom(b"\x00\x00\x00\x01", &data(DATA_UTF8, b"Apple")),
	);

	let meta = full_atom(b"meta", &[hdlr, keys, ilst].concat());
	let moov = atom(b"moov", &[mvhd(), meta].concat());

	[ftyp(), moov, mdat()].concat()
}

#[test_log::test]
fn keys_indexed_metadata_round_trips() {
	let input = keys_indexed_metadata();

	let parsed = parse(&input, ParseOptions::new()).unwrap();
	assert!(matches!(
		parsed.diagnostics.as_slice(),
		[Diagnostic::OpaqueContainer { ident, .. }] if ident == b"ilst"
	));

	// Everything around the `ilst` atom is still decoded
	let meta = &parsed.atoms[1].children()[1];
	assert_eq!(meta.ident(), *b"meta");
	assert!(meta.is_container());
	assert_eq!(meta.children().len(), 3);
	assert!(!meta.children()[2].is_container());

	assert_eq!(serialize(&parsed.atoms).unwrap(), input);

	let file = Mp4File::parse(&input, ParseOptions::new()).unwrap();
	assert_eq!(file.title(), None);
	assert_eq!(file.to_bytes().unwrap(), input);

	let err = parse(
		&input,
		ParseOptions::new().parsing_mode(ParsingMode::Strict),
	)
	.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::InvalidBlockType(ident) if ident == b"\x00\x00\x00\x01"));
}
