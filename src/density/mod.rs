//! Content density: how much text a slide carries.
//!
//! This module provides:
//! - [`validate_slide_content`]: bullet, word and table-row limits
//! - [`suggest_split`]: redistribute overflowing content over several slides
//! - [`truncate_to_limits`]: move overflow into speaker notes
//! - [`passes_density_check`]: a cheap boolean pre-check

mod scan;
mod split;
mod truncate;

pub use split::{suggest_split, SplitSuggestion};
pub use truncate::{truncate_to_limits, Truncation};

use serde::Serialize;

use crate::model::SlideContent;
use crate::policy::{DensityLimits, DensityPolicy};

use scan::{classify, LineKind, Tally};

/// Measured content of a slide body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DensityCounts {
    /// Bullet and numbered items.
    pub bullets: usize,
    pub words: usize,
    /// Data rows of the largest table.
    pub table_rows: usize,
}

/// Outcome of a density check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DensityResult {
    pub valid: bool,
    pub counts: DensityCounts,
    pub limits: DensityLimits,
    pub violations: Vec<String>,
}

/// Measures a body without judging it.
pub fn measure(body: &str) -> DensityCounts {
    let mut tally = Tally::default();
    for line in body.lines() {
        tally.push(classify(line));
    }
    tally.counts()
}

/// Checks a slide against the density limits for its slide type.
pub fn validate_slide_content(slide: &SlideContent, policy: &DensityPolicy) -> DensityResult {
    validate_body(&slide.body, &policy.limits_for(slide.slide_type))
}

/// Checks a body against explicit limits.
pub fn validate_body(body: &str, limits: &DensityLimits) -> DensityResult {
    let counts = measure(body);
    let mut violations = limits.check();

    if counts.bullets > limits.max_bullets {
        violations.push(format!(
            "Too many bullet points: {} (max {})",
            counts.bullets, limits.max_bullets
        ));
    }
    if counts.words > limits.max_words {
        violations.push(format!(
            "Too many words: {} (max {})",
            counts.words, limits.max_words
        ));
    }
    if counts.table_rows > limits.max_table_rows {
        violations.push(format!(
            "Too many table rows: {} (max {})",
            counts.table_rows, limits.max_table_rows
        ));
    }

    DensityResult {
        valid: violations.is_empty(),
        counts,
        limits: *limits,
        violations,
    }
}

/// Returns true when a body is within every limit.
///
/// Stops scanning at the first exceeded limit. Malformed limits never pass.
pub fn passes_density_check(body: &str, limits: &DensityLimits) -> bool {
    if !limits.check().is_empty() {
        return false;
    }
    let mut tally = Tally::default();
    for line in body.lines() {
        tally.push(classify(line));
        if tally.exceeds(limits) {
            return false;
        }
    }
    true
}

/// The text of every bullet and numbered item, in order.
pub fn list_items(body: &str) -> Vec<&str> {
    body.lines()
        .filter_map(|line| match classify(line) {
            LineKind::Bullet(text) | LineKind::Numbered(text) => Some(text),
            _ => None,
        })
        .collect()
}

/// Fuzz-only entrypoint exercising every body scanner.
///
/// Panics if truncation is not idempotent, a split page breaks a limit,
/// or a split produces an item list different from the input's.
#[cfg(feature = "fuzzing")]
pub fn fuzz_scan_body(body: &str, limits: &DensityLimits) {
    if !limits.check().is_empty() {
        return;
    }
    let _ = scan::blocks(body);
    let _ = passes_density_check(body, limits);

    let once = truncate_to_limits(body, limits);
    let twice = truncate_to_limits(&once.body, limits);
    assert!(!twice.was_truncated, "truncation is not idempotent");

    let slide = SlideContent::new("fuzz", body, crate::model::SlideType::default());
    let split = suggest_split(&slide, &DensityPolicy::uniform(*limits));
    for page in &split.new_slides {
        assert!(validate_body(&page.body, limits).valid, "split page over its limits");
    }
    if split.should_split && limits.max_words >= measure(body).words {
        let items: Vec<&str> = split.new_slides.iter().flat_map(|s| list_items(&s.body)).collect();
        assert_eq!(items, list_items(body), "split lost or reordered items");
    }
}
