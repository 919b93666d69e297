use crate::{read_everything, sample, timeout_test};
use m4atag::atom::{parse, serialize};
use m4atag::config::{ParseOptions, ParsingMode};

#[test_log::test]
fn every_prefix() {
	let input = sample();
	for len in 0..input.len() {
		let _ = parse(&input[..len], ParseOptions::new());
		let _ = parse(&input[..len], ParseOptions::new().parsing_mode(ParsingMode::Strict));
	}
}

#[test_log::test]
fn single_byte_mutations() {
	let input = sample();
	for index in 0..input.len() {
		for value in [0x00, 0x01, 0x07, 0x08, 0x7F, 0xA9, 0xFF] {
			let mut mutated = input.clone();
			mutated[index] = value;

			// Anything that parses must serialize back to the exact same bytes
			if let Ok(parsed) = parse(&mutated, ParseOptions::new()) {
				assert_eq!(serialize(&parsed.atoms).unwrap(), mutated);
			}

			read_everything(&mutated);
		}
	}
}

#[test_log::test]
fn huge_declared_sizes() {
	let mut input = sample();
	input[..4].copy_from_slice(&u32::MAX.to_be_bytes());
	timeout_test(input);

	// An extended `mdat` claiming to be far larger than the input
	let mut input = b"\x00\x00\x00\x01mdat".to_vec();
	input.extend_from_slice(&u64::MAX.to_be_bytes());
	timeout_test(input);
}

#[test_log::test]
fn deep_nesting() {
	// Nested `udta` atoms, far deeper than any real file
	let mut inner = Vec::new();
	for _ in 0..1_000 {
		let mut outer = u32::try_from(inner.len() + 8)
			.unwrap()
			.to_be_bytes()
			.to_vec();
		outer.extend_from_slice(b"udta");
		outer.extend_from_slice(&inner);
		inner = outer;
	}

	let mut input = u32::try_from(inner.len() + 8)
		.unwrap()
		.to_be_bytes()
		.to_vec();
	input.extend_from_slice(b"moov");
	input.extend_from_slice(&inner);

	let parsed = parse(&input, ParseOptions::new()).unwrap();
	assert_eq!(serialize(&parsed.atoms).unwrap(), input);

	timeout_test(input);
}
