//! Fuzz target for slide body scanning.
//!
//! Feeds arbitrary UTF-8 bodies through the density scanner, truncation
//! and splitting, checking for panics and broken invariants.

#![no_main]

use deckguard::density::fuzz_scan_body;
use deckguard::policy::DensityLimits;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 || data.len() > 64 * 1024 {
        return;
    }

    let limits = DensityLimits {
        max_bullets: usize::from(data[0] % 8) + 1,
        max_words: usize::from(data[1]) + 1,
        max_table_rows: usize::from(data[2] % 8) + 1,
    };

    let Ok(body) = std::str::from_utf8(&data[3..]) else {
        return;
    };

    fuzz_scan_body(body, &limits);
});
