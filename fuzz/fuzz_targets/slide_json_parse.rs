//! Fuzz target for slide document parsing and validation.
//!
//! Anything that parses as a slide document must validate without
//! panicking.

#![no_main]

use deckguard::io::slide_document_from_str;
use deckguard::policy::DesignPolicy;
use deckguard::validation::validate_slide_design;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(doc) = slide_document_from_str(json) {
        let _ = validate_slide_design(&doc.slide, &doc.theme, &DesignPolicy::default());
    }
});
