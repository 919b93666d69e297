#![no_main]

use libfuzzer_sys::fuzz_target;
use m4atag::config::ParseOptions;
use m4atag::file::Mp4File;

fuzz_target!(|data: Vec<u8>| {
	if let Ok(file) = Mp4File::parse(&data, ParseOptions::new()) {
		let entries = file.entries().map(|ident| ident.into_owned()).collect::<Vec<_>>();
		for ident in &entries {
			let _ = file.get_known(ident);
		}

		let _ = file.to_bytes();
	}
});
