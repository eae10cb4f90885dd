//! Trimming a body to its limits without a model call.
//!
//! Whatever does not fit is collected into an `overflow` string meant for
//! speaker notes.

use serde::Serialize;

use crate::policy::DensityLimits;

use super::scan::{classify, line_words, plain_text, LineKind};

/// Result of [`truncate_to_limits`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Truncation {
    pub body: String,
    /// `"Additional details: "` followed by the removed items joined with
    /// `"; "`, or empty when nothing was removed.
    pub overflow: String,
    pub was_truncated: bool,
}

const OVERFLOW_PREFIX: &str = "Additional details: ";

/// Keeps content up to each limit and moves the rest to `overflow`.
///
/// - list items past `max_bullets` are moved out
/// - table data rows past `max_table_rows` are moved out, counted per
///   table (the counter resets when a table ends)
/// - once a line would exceed `max_words`, it and every later line are
///   moved out
///
/// Blank lines and `Sources:` trailers always stay. Running the result
/// through again changes nothing.
///
/// # Examples
///
/// ```
/// use deckguard::density::truncate_to_limits;
/// use deckguard::policy::DensityLimits;
///
/// let limits = DensityLimits { max_bullets: 2, ..Default::default() };
/// let out = truncate_to_limits("- a\n- **b**\n- c\n- d", &limits);
/// assert_eq!(out.body, "- a\n- **b**");
/// assert_eq!(out.overflow, "Additional details: c; d");
/// assert!(out.was_truncated);
/// ```
pub fn truncate_to_limits(body: &str, limits: &DensityLimits) -> Truncation {
    let lines: Vec<&str> = body.lines().collect();
    let kinds: Vec<LineKind<'_>> = lines.iter().map(|l| classify(l)).collect();

    let mut kept: Vec<&str> = Vec::new();
    let mut overflow: Vec<String> = Vec::new();
    let mut dropped_any = false;

    let mut bullets = 0;
    let mut words = 0;
    let mut words_exhausted = false;
    let mut table_rows = 0;
    let mut in_table = false;
    let mut last_kept_is_table = false;

    for (i, (line, kind)) in lines.iter().zip(&kinds).enumerate() {
        let kind = *kind;

        if !kind.is_table() {
            in_table = false;
            table_rows = 0;
        }

        if matches!(kind, LineKind::Blank | LineKind::Sources) {
            kept.push(line);
            last_kept_is_table = false;
            continue;
        }

        // A table's first row is its header when an alignment row follows.
        let is_header = matches!(kind, LineKind::TableRow(_))
            && !in_table
            && matches!(kinds.get(i + 1), Some(LineKind::TableSeparator));
        let is_data_row = matches!(kind, LineKind::TableRow(_)) && !is_header;
        if kind.is_table() {
            in_table = true;
        }

        let lw = line_words(kind);
        let over_words = words_exhausted || words + lw > limits.max_words;
        let over_bullets = kind.is_list_item() && bullets >= limits.max_bullets;
        let over_rows = is_data_row && table_rows >= limits.max_table_rows;

        if over_words || over_bullets || over_rows {
            words_exhausted |= over_words;
            dropped_any = true;
            let text = plain_text(kind);
            if !text.is_empty() {
                overflow.push(text);
            }
            // Keep the surviving table fenced off from what follows.
            if !kind.is_table() && last_kept_is_table {
                kept.push("");
                last_kept_is_table = false;
            }
            continue;
        }

        kept.push(line);
        words += lw;
        if kind.is_list_item() {
            bullets += 1;
        }
        if is_data_row {
            table_rows += 1;
        }
        last_kept_is_table = kind.is_table();
    }

    while kept.last().is_some_and(|l| l.trim().is_empty()) {
        kept.pop();
    }

    Truncation {
        body: kept.join("\n"),
        overflow: if overflow.is_empty() {
            String::new()
        } else {
            format!("{OVERFLOW_PREFIX}{}", overflow.join("; "))
        },
        was_truncated: dropped_any,
    }
}
