//! Fuzz target for hex color parsing.
//!
//! Any string that parses must format back to a canonical `#RRGGBB` that
//! parses to the same color.

#![no_main]

use deckguard::color::Rgb;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(rgb) = Rgb::from_hex(input) {
        let hex = rgb.to_hex();
        assert_eq!(hex.len(), 7);
        assert_eq!(Rgb::from_hex(&hex), Ok(rgb));
    }
});
