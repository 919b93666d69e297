use crate::util::{
	DATA_BE_SIGNED, DATA_JPEG, DATA_RESERVED, DATA_UTF8, atom, entry, tagged, temp_file, typical, untagged,
};

use std::borrow::Cow;
use std::io::Seek;

use m4atag::config::{ParseOptions, WriteOptions};
use m4atag::diagnostic::Diagnostic;
use m4atag::error::ErrorKind;
use m4atag::file::Mp4File;
use m4atag::ilst::{AtomIdent, MetadataValue, ValueShape, constants};

fn mood() -> AtomIdent<'static> {
	AtomIdent::Freeform {
		mean: Cow::Borrowed("com.apple.iTunes"),
		name: Cow::Borrowed("MOOD"),
	}
}

#[test_log::test]
fn read_typical() {
	let file = Mp4File::parse(&typical(), ParseOptions::new()).unwrap();

	assert_eq!(file.major_brand(), Some(*b"M4A "));
	assert_eq!(file.title().as_deref(), Some("Foo title"));
	assert_eq!(file.artist().as_deref(), Some("Foo artist"));
	assert_eq!(file.track(), Some((1, 10)));
	assert_eq!(file.bpm(), Some(128));
	assert_eq!(
		file.cover_art().as_deref(),
		Some(&b"\xFF\xD8\xFF\xE0fake jpeg"[..])
	);
	assert_eq!(
		file.get(&mood(), ValueShape::String),
		Some(MetadataValue::String(String::from("Happy")))
	);

	// Everything in the file is known
	assert!(file.diagnostics().is_empty());
}

#[test_log::test]
fn set_string() {
	let mut file = Mp4File::parse(&typical(), ParseOptions::new()).unwrap();

	file.set_title(String::from("Hello")).unwrap();

	let reparsed = Mp4File::parse(&file.to_bytes().unwrap(), ParseOptions::new()).unwrap();
	assert_eq!(reparsed.title().as_deref(), Some("Hello"));

	// The other entries are untouched
	assert_eq!(reparsed.artist().as_deref(), Some("Foo artist"));
	assert_eq!(reparsed.track(), Some((1, 10)));
}

#[test_log::test]
fn set_u32() {
	let mut file = Mp4File::parse(&typical(), ParseOptions::new()).unwrap();

	file.set(&constants::TV_EPISODE, MetadataValue::UInt32(1000))
		.unwrap();

	let reparsed = Mp4File::parse(&file.to_bytes().unwrap(), ParseOptions::new()).unwrap();
	assert_eq!(
		reparsed.get(&constants::TV_EPISODE, ValueShape::UInt32),
		Some(MetadataValue::UInt32(1000))
	);
	assert_eq!(
		reparsed.get_known(&constants::TV_EPISODE),
		Some(MetadataValue::UInt32(1000))
	);
}

#[test_log::test]
fn integer_width_mismatch() {
	let input = tagged(&[entry(b"tves", DATA_BE_SIGNED, &[0, 3, 232])]);
	let file = Mp4File::parse(&input, ParseOptions::new()).unwrap();

	assert_eq!(file.get(&constants::TV_EPISODE, ValueShape::UInt32), None);

	let err = file
		.try_get(&constants::TV_EPISODE, ValueShape::UInt32)
		.unwrap_err();
	assert!(matches!(
		err.kind(),
		ErrorKind::UnsupportedShapeWidth {
			expected: 4,
			found: 3
		}
	));
}

#[test_log::test]
fn pair_keeps_reserved_bytes() {
	let input = tagged(&[entry(
		b"trkn",
		DATA_RESERVED,
		&[0xAA, 0xBB, 0, 1, 0, 10, 0xCC, 0xDD],
	)]);
	let mut file = Mp4File::parse(&input, ParseOptions::new()).unwrap();

	file.set_track((3, 16)).unwrap();
	assert_eq!(file.track(), Some((3, 16)));

	let expected = tagged(&[entry(
		b"trkn",
		DATA_RESERVED,
		&[0xAA, 0xBB, 0, 3, 0, 16, 0xCC, 0xDD],
	)]);
	assert_eq!(file.to_bytes().unwrap(), expected);
}

#[test_log::test]
fn data_type_preserved() {
	// `tmpo` written as an unsigned integer rather than the usual signed one
	let input = tagged(&[entry(b"tmpo", 22, &[0, 90])]);
	let mut file = Mp4File::parse(&input, ParseOptions::new()).unwrap();

	file.set_bpm(140).unwrap();
	assert_eq!(
		file.to_bytes().unwrap(),
		tagged(&[entry(b"tmpo", 22, &[0, 140])])
	);

	file.set_write_options(WriteOptions::new().preserve_data_type(false));
	file.set_bpm(141).unwrap();
	assert_eq!(
		file.to_bytes().unwrap(),
		tagged(&[entry(b"tmpo", DATA_BE_SIGNED, &[0, 141])])
	);
}

#[test_log::test]
fn entry_without_data() {
	let input = tagged(&[atom(b"\xA9nam", &atom(b"free", &[]))]);
	let file = Mp4File::parse(&input, ParseOptions::new()).unwrap();

	for shape in [
		ValueShape::String,
		ValueShape::UInt8,
		ValueShape::UInt16,
		ValueShape::UInt32,
		ValueShape::UInt64,
		ValueShape::Pair,
		ValueShape::Image,
	] {
		assert_eq!(file.get(&constants::TITLE, shape), None);
	}
}

#[test_log::test]
fn container_absent() {
	let input = untagged();
	let mut file = Mp4File::parse(&input, ParseOptions::new()).unwrap();

	assert_eq!(file.title(), None);

	let err = file.set_title(String::from("Foo title")).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::MetadataContainerAbsent));

	// Nothing changed
	assert_eq!(file.to_bytes().unwrap(), input);
}

#[test_log::test]
fn container_created() {
	let mut file = Mp4File::parse(&untagged(), ParseOptions::new()).unwrap();
	file.set_write_options(WriteOptions::new().create_missing_containers(true));

	file.set_title(String::from("Foo title")).unwrap();
	file.set_artist(String::from("Foo artist")).unwrap();
	file.set_track((1, 10)).unwrap();

	let reparsed = Mp4File::parse(&file.to_bytes().unwrap(), ParseOptions::new()).unwrap();
	assert_eq!(reparsed.title().as_deref(), Some("Foo title"));
	assert_eq!(reparsed.artist().as_deref(), Some("Foo artist"));
	assert_eq!(reparsed.track(), Some((1, 10)));

	// The new `moov.udta` lands after `mvhd`
	let moov = &reparsed.atoms()[1];
	assert_eq!(moov.ident(), *b"moov");
	assert_eq!(moov.children()[0].ident(), *b"mvhd");
	assert_eq!(moov.children()[1].ident(), *b"udta");
}

#[test_log::test]
fn freeform() {
	let mut file = Mp4File::parse(&typical(), ParseOptions::new()).unwrap();

	file.set(&mood(), MetadataValue::String(String::from("Sad")))
		.unwrap();

	let energy = AtomIdent::Freeform {
		mean: Cow::Borrowed("com.apple.iTunes"),
		name: Cow::Borrowed("ENERGY"),
	};
	file.set(&energy, MetadataValue::String(String::from("High")))
		.unwrap();

	let reparsed = Mp4File::parse(&file.to_bytes().unwrap(), ParseOptions::new()).unwrap();
	assert_eq!(
		reparsed.get_known(&mood()),
		Some(MetadataValue::String(String::from("Sad")))
	);
	assert_eq!(
		reparsed.get_known(&energy),
		Some(MetadataValue::String(String::from("High")))
	);

	let entries = reparsed.entries().collect::<Vec<_>>();
	assert!(entries.contains(&mood()));
	assert!(entries.contains(&energy));
}

#[test_log::test]
fn unknown_identifier_diagnostic() {
	let input = tagged(&[
		entry(b"\xA9nam", DATA_UTF8, b"Foo title"),
		entry(b"zzzz", DATA_UTF8, b"???"),
	]);

	let file = Mp4File::parse(&input, ParseOptions::new()).unwrap();
	assert_eq!(
		file.diagnostics(),
		[Diagnostic::UnrecognizedMetadataIdentifier(
			AtomIdent::Fourcc(*b"zzzz")
		)]
	);

	// Unknown entries are still readable, and kept when writing
	assert_eq!(
		file.get(&AtomIdent::Fourcc(*b"zzzz"), ValueShape::String),
		Some(MetadataValue::String(String::from("???")))
	);
	assert_eq!(file.to_bytes().unwrap(), input);
}

#[test_log::test]
fn remove_entry() {
	let mut file = Mp4File::parse(&typical(), ParseOptions::new()).unwrap();

	assert!(file.remove(&mood()));
	assert!(file.remove_cover_art());
	assert!(!file.remove_cover_art());

	let reparsed = Mp4File::parse(&file.to_bytes().unwrap(), ParseOptions::new()).unwrap();
	assert_eq!(reparsed.get_known(&mood()), None);
	assert_eq!(reparsed.cover_art(), None);
	assert_eq!(reparsed.title().as_deref(), Some("Foo title"));
}

#[test_log::test]
fn set_after_get_is_idempotent() {
	let input = typical();
	let mut file = Mp4File::parse(&input, ParseOptions::new()).unwrap();

	let title = file.title().unwrap();
	let track = file.track().unwrap();
	let bpm = file.bpm().unwrap();
	let cover_art = file.cover_art().unwrap();

	file.set_title(title).unwrap();
	file.set_track(track).unwrap();
	file.set_bpm(bpm).unwrap();
	file.set_cover_art(cover_art).unwrap();

	assert_eq!(file.to_bytes().unwrap(), input);

	// The stored image type wins over the image's signature
	for data_type in [DATA_RESERVED, DATA_JPEG] {
		let input = tagged(&[entry(b"covr", data_type, b"\x89PNG\r\n\x1a\nxx")]);
		let mut file = Mp4File::parse(&input, ParseOptions::new()).unwrap();

		let cover_art = file.cover_art().unwrap();
		file.set_cover_art(cover_art).unwrap();

		assert_eq!(file.to_bytes().unwrap(), input);
	}
}

#[test_log::test]
fn save_to_file() {
	let mut temp = temp_file(&typical());

	let mut file = Mp4File::read_from(&mut temp, ParseOptions::new()).unwrap();
	file.set_title(String::from("A much, much longer title than before"))
		.unwrap();
	file.save_to(&mut temp).unwrap();

	temp.rewind().unwrap();
	let file = Mp4File::read_from(&mut temp, ParseOptions::new()).unwrap();
	assert_eq!(
		file.title().as_deref(),
		Some("A much, much longer title than before")
	);

	// Shrinking the file truncates it
	let mut file = file;
	file.set_title(String::from("Short")).unwrap();
	file.save_to(&mut temp).unwrap();

	temp.rewind().unwrap();
	let reread = Mp4File::read_from(&mut temp, ParseOptions::new()).unwrap();
	assert_eq!(reread.title().as_deref(), Some("Short"));
	assert_eq!(reread.to_bytes().unwrap(), file.to_bytes().unwrap());
}

#[test_log::test]
fn repeated_saves_are_stable() {
	let mut temp = temp_file(&typical());
	let file = Mp4File::read_from(&mut temp, ParseOptions::new()).unwrap();

	let mut snapshots = Vec::new();
	for _ in 0..3 {
		file.save_to(&mut temp).unwrap();
		temp.rewind().unwrap();

		let reread = Mp4File::read_from(&mut temp, ParseOptions::new()).unwrap();
		snapshots.push(reread.to_bytes().unwrap());
		temp.rewind().unwrap();
	}

	assert!(snapshots.iter().all(|snapshot| *snapshot == typical()));
}
