#![allow(dead_code)]

use deckguard::color::Rgb;
use deckguard::policy::DensityLimits;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_rgb() -> BoxedStrategy<Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>())
        .prop_map(|(r, g, b)| Rgb::new(r, g, b))
        .boxed()
}

/// Hex strings in the spellings users actually type.
pub fn arb_hex() -> BoxedStrategy<String> {
    (arb_rgb(), any::<bool>(), any::<bool>())
        .prop_map(|(rgb, hash, lower)| {
            let hex = rgb.to_hex();
            let hex = if hash { hex } else { hex[1..].to_string() };
            if lower {
                hex.to_lowercase()
            } else {
                hex
            }
        })
        .boxed()
}

pub fn arb_limits() -> BoxedStrategy<DensityLimits> {
    (1usize..=8, 1usize..=40, 1usize..=6)
        .prop_map(|(max_bullets, max_words, max_table_rows)| DensityLimits {
            max_bullets,
            max_words,
            max_table_rows,
        })
        .boxed()
}

fn words(max: usize) -> BoxedStrategy<String> {
    proptest::collection::vec("[a-z]{1,6}", 1..=max)
        .prop_map(|w| w.join(" "))
        .boxed()
}

/// One line of the slide markdown subset.
pub fn arb_line() -> BoxedStrategy<String> {
    prop_oneof![
        3 => words(4).prop_map(|w| format!("- {w}")),
        1 => words(4).prop_map(|w| format!("* **{w}**")),
        2 => (1u8..=9, words(4)).prop_map(|(n, w)| format!("{n}. {w}")),
        2 => words(12),
        1 => (words(3), prop::sample::select(vec!["-", "*", "2.", "|", "#", ">", "Sources:"]), words(3))
            .prop_map(|(a, marker, b)| format!("{a} {marker} {b}")),
        1 => words(3).prop_map(|w| format!("# {w}")),
        1 => words(6).prop_map(|w| format!("> {w}")),
        3 => (words(2), words(2)).prop_map(|(a, b)| format!("| {a} | {b} |")),
        1 => Just("|---|---|".to_string()),
        2 => Just(String::new()),
    ]
    .boxed()
}

/// A slide body, optionally ending with a `Sources:` trailer.
pub fn arb_body(max_lines: usize) -> BoxedStrategy<String> {
    (
        proptest::collection::vec(arb_line(), 0..=max_lines),
        proptest::option::of(words(3)),
    )
        .prop_map(|(lines, sources)| {
            let mut body = lines.join("\n");
            if let Some(sources) = sources {
                body.push_str("\nSources: ");
                body.push_str(&sources);
            }
            body
        })
        .boxed()
}
