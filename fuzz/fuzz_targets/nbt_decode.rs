#![no_main]

use libfuzzer_sys::fuzz_target;
use nbt::{decode_document, encode_document};

fuzz_target!(|data: &[u8]| {
    // Decoding must never panic, and any document it accepts must
    // re-encode to exactly the bytes it consumed.
    if let Ok((document, consumed)) = decode_document(data) {
        let encoded = encode_document(&document).expect("decoded documents re-encode");
        assert_eq!(encoded, &data[..consumed]);
    }
});
