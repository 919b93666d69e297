#![no_main]

use libfuzzer_sys::fuzz_target;
use m4atag::atom::{parse, serialize};
use m4atag::config::ParseOptions;

fuzz_target!(|data: Vec<u8>| {
	if let Ok(parsed) = parse(&data, ParseOptions::new()) {
		assert_eq!(serialize(&parsed.atoms).ok(), Some(data));
	}
});
