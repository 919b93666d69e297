#![allow(missing_docs)]

use m4atag::atom::{Atom, serialize};
use m4atag::config::{ParseOptions, ParsingMode};
use m4atag::file::Mp4File;

use std::thread;
use std::time::Instant;

mod atom_tree_parse;

fn data(data_type: u8, value: &[u8]) -> Atom {
	let mut payload = vec![0, 0, 0, data_type, 0, 0, 0, 0];
	payload.extend_from_slice(value);
	Atom::new(*b"data", payload)
}

/// A small, well-formed file touching every container type
#[allow(clippy::missing_panics_doc)]
pub fn sample() -> Vec<u8> {
	let ilst = Atom::container(
		*b"ilst",
		vec![
			Atom::container(*b"\xA9nam", vec![data(1, b"Foo title")]),
			Atom::container(*b"trkn", vec![data(0, &[0, 0, 0, 1, 0, 10, 0, 0])]),
			Atom::container(*b"tmpo", vec![data(21, &[0, 128])]),
			Atom::container(*b"covr", vec![data(14, b"\x89PNG\r\n\x1a\n")]),
			Atom::container(
				*b"----",
				vec![
					Atom::new(*b"mean", b"\0\0\0\0com.apple.iTunes".to_vec()),
					Atom::new(*b"name", b"\0\0\0\0MOOD".to_vec()),
					data(1, b"Happy"),
				],
			),
		],
	);

	let meta = Atom::container_with_prefix(
		*b"meta",
		vec![0; 4],
		vec![
			Atom::new(*b"hdlr", b"\0\0\0\0\0\0\0\0mdirappl\0\0\0\0\0\0\0\0\0".to_vec()),
			ilst,
		],
	);

	serialize(&[
		Atom::new(*b"ftyp", b"M4A \x00\x00\x02\x00isomM4A ".to_vec()),
		Atom::container(
			*b"moov",
			vec![
				Atom::new(*b"mvhd", vec![0; 100]),
				Atom::container(*b"udta", vec![meta]),
			],
		),
		Atom::new(*b"mdat", vec![0xAB; 32]),
	])
	.unwrap()
}

/// Read `input` in both parsing modes, touching every entry
pub fn read_everything(input: &[u8]) {
	for parsing_mode in [ParsingMode::Strict, ParsingMode::BestAttempt] {
		let Ok(file) = Mp4File::parse(input, ParseOptions::new().parsing_mode(parsing_mode)) else {
			continue;
		};

		let entries = file
			.entries()
			.map(|ident| ident.into_owned())
			.collect::<Vec<_>>();
		for ident in &entries {
			let _ = file.get_known(ident);
		}

		let _ = file.to_bytes();
	}
}

/// Fail if `input` takes longer than a few seconds to read
#[allow(clippy::missing_panics_doc)]
pub fn timeout_test(input: Vec<u8>) {
	let instant = Instant::now();
	let thread = thread::spawn(move || read_everything(&input));

	while instant.elapsed().as_secs() < 3 {
		if thread.is_finished() {
			thread.join().unwrap();
			return;
		}
	}

	panic!("Failed to run test");
}
