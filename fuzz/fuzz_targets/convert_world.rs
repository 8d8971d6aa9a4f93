#![no_main]

use libfuzzer_sys::fuzz_target;
use world::{convert_world, MemoryArchive, NoProgress};

fuzz_target!(|data: &[u8]| {
    // End-to-end conversion over whatever parses as an archive.
    if let Ok(archive) = MemoryArchive::from_bytes(data) {
        let _ = convert_world(archive, &mut NoProgress);
    }
});
