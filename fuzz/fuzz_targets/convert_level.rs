#![no_main]

use libfuzzer_sys::fuzz_target;
use world::{convert_level_dat, NoProgress};

fuzz_target!(|data: &[u8]| {
    // Header detection plus the full payload pipeline on arbitrary bytes.
    // Errors are expected; panics are not.
    let _ = convert_level_dat(data, &mut NoProgress);
});
