#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz the full pipeline: extraction then resolution
    // Resolution must fail with an error rather than panic on any document
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(doc) = libcxf::parse_document(text) {
            let _ = doc.resolve();
        }
    }
});
