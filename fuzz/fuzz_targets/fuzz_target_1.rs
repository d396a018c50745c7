#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate ggafix;

use std::io::Cursor;
use ggafix::{GgaReader, ReaderConfig};

fuzz_target!(|data: &[u8]| {
    let _ = ggafix::map(data);

    let config = ReaderConfig::default().with_checksum(false);
    for _ in GgaReader::with_config(Cursor::new(data), config) {
        ();
    }
});
