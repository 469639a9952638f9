#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz the document extractor with arbitrary bytes
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = libcxf::parse_document(text);
    }
});
