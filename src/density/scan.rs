//! Line classification and counting for slide bodies.
//!
//! Bodies use a small markdown subset. Each line is classified on its own;
//! [`blocks`] then groups consecutive lines with a state machine over
//! `Prose | Bullets | Numbered | Table` that flushes the open block
//! whenever the line type changes or a blank line appears.

use crate::policy::DensityLimits;

use super::DensityCounts;

/// What a single body line is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    Blank,
    /// Text after a `- `, `* ` or `•` marker.
    Bullet(&'a str),
    /// Text after an `N. ` or `N) ` marker.
    Numbered(&'a str),
    /// A `|...|` row, trimmed.
    TableRow(&'a str),
    /// A `|---|:---:|` alignment row.
    TableSeparator,
    Heading(&'a str),
    Quote(&'a str),
    /// A `Sources:` trailer. Never counted.
    Sources,
    Paragraph(&'a str),
}

impl LineKind<'_> {
    pub(crate) fn is_list_item(self) -> bool {
        matches!(self, LineKind::Bullet(_) | LineKind::Numbered(_))
    }

    pub(crate) fn is_table(self) -> bool {
        matches!(self, LineKind::TableRow(_) | LineKind::TableSeparator)
    }
}

pub(crate) fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    if trimmed.starts_with('|') {
        return if is_table_separator(trimmed) {
            LineKind::TableSeparator
        } else {
            LineKind::TableRow(trimmed)
        };
    }

    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
        .or_else(|| trimmed.strip_prefix('•'))
    {
        return LineKind::Bullet(rest.trim());
    }
    if trimmed == "-" || trimmed == "*" {
        return LineKind::Bullet("");
    }

    if let Some(rest) = numbered_item(trimmed) {
        return LineKind::Numbered(rest);
    }

    if let Some(rest) = trimmed.strip_prefix('#') {
        let rest = rest.trim_start_matches('#');
        if rest.is_empty() || rest.starts_with(' ') {
            return LineKind::Heading(rest.trim());
        }
    }

    if let Some(rest) = trimmed.strip_prefix('>') {
        return LineKind::Quote(rest.trim());
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("sources:") || lower.starts_with("source:") {
        return LineKind::Sources;
    }

    LineKind::Paragraph(trimmed)
}

/// Splits `12. text` / `3) text` into its text.
fn numbered_item(trimmed: &str) -> Option<&str> {
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits > 3 {
        return None;
    }
    let rest = &trimmed[digits..];
    let rest = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))?;
    if rest.is_empty() {
        Some("")
    } else if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn is_table_separator(trimmed: &str) -> bool {
    trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

/// Words carried by a line once markdown is stripped.
///
/// Bold/italic/code markers, heading hashes, quote markers, list markers
/// and table pipes do not count; a token counts only if it still contains
/// a letter or digit.
pub(crate) fn line_words(kind: LineKind<'_>) -> usize {
    match kind {
        LineKind::Blank | LineKind::TableSeparator | LineKind::Sources => 0,
        LineKind::TableRow(row) => row.split('|').map(count_words).sum(),
        LineKind::Bullet(text)
        | LineKind::Numbered(text)
        | LineKind::Heading(text)
        | LineKind::Quote(text)
        | LineKind::Paragraph(text) => count_words(text),
    }
}

pub(crate) fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .count()
}

/// Text of a line with its markers and emphasis removed.
pub(crate) fn plain_text(kind: LineKind<'_>) -> String {
    match kind {
        LineKind::Blank | LineKind::TableSeparator | LineKind::Sources => String::new(),
        LineKind::TableRow(row) => row
            .split('|')
            .map(|cell| strip_emphasis(cell.trim()))
            .filter(|cell| !cell.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        LineKind::Bullet(text)
        | LineKind::Numbered(text)
        | LineKind::Heading(text)
        | LineKind::Quote(text)
        | LineKind::Paragraph(text) => strip_emphasis(text),
    }
}

fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
        .replace("__", "")
        .chars()
        .filter(|c| !matches!(c, '*' | '`'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Running density counters over a stream of lines.
///
/// The table-row counter is per table: a table ends at the first line that
/// is not a row or separator. A table's first line is its header, and is
/// not counted, when the very next line is a separator.
#[derive(Clone, Debug, Default)]
pub(crate) struct Tally {
    bullets: usize,
    words: usize,
    max_table_rows: usize,
    current_rows: usize,
    in_table: bool,
    /// Lines of the open table seen so far, separators included.
    table_lines: usize,
    first_line_is_row: bool,
}

impl Tally {
    pub(crate) fn push(&mut self, kind: LineKind<'_>) {
        match kind {
            LineKind::TableRow(_) | LineKind::TableSeparator => {
                if !self.in_table {
                    self.in_table = true;
                    self.current_rows = 0;
                    self.table_lines = 0;
                    self.first_line_is_row = matches!(kind, LineKind::TableRow(_));
                }
                match kind {
                    LineKind::TableRow(_) => self.current_rows += 1,
                    _ if self.table_lines == 1 && self.first_line_is_row => self.current_rows = 0,
                    _ => {}
                }
                self.table_lines += 1;
            }
            _ => self.close_table(),
        }

        if kind.is_list_item() {
            self.bullets += 1;
        }
        self.words += line_words(kind);
    }

    fn close_table(&mut self) {
        if self.in_table {
            self.max_table_rows = self.max_table_rows.max(self.current_rows);
            self.in_table = false;
            self.current_rows = 0;
            self.table_lines = 0;
        }
    }

    pub(crate) fn counts(&self) -> DensityCounts {
        DensityCounts {
            bullets: self.bullets,
            words: self.words,
            table_rows: self.max_table_rows.max(self.current_rows),
        }
    }

    /// True once any counter is over its limit.
    ///
    /// A header row is briefly counted as data until its separator shows
    /// up, which is harmless because every limit is at least 1.
    pub(crate) fn exceeds(&self, limits: &DensityLimits) -> bool {
        let counts = self.counts();
        counts.bullets > limits.max_bullets
            || counts.words > limits.max_words
            || counts.table_rows > limits.max_table_rows
    }
}

/// Which list or prose state a block was scanned in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BlockKind {
    Prose,
    Bullets,
    Numbered,
    Table,
}

impl BlockKind {
    fn of(kind: LineKind<'_>) -> Option<Self> {
        match kind {
            LineKind::Blank | LineKind::Sources => None,
            LineKind::Bullet(_) => Some(BlockKind::Bullets),
            LineKind::Numbered(_) => Some(BlockKind::Numbered),
            LineKind::TableRow(_) | LineKind::TableSeparator => Some(BlockKind::Table),
            LineKind::Heading(_) | LineKind::Quote(_) | LineKind::Paragraph(_) => {
                Some(BlockKind::Prose)
            }
        }
    }
}

/// A run of consecutive lines of one kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Block<'a> {
    pub kind: BlockKind,
    pub lines: Vec<&'a str>,
    /// A blank line separated this block from the previous one.
    pub after_blank: bool,
}

/// A body split into blocks plus any `Sources:` trailer lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ParsedBody<'a> {
    pub blocks: Vec<Block<'a>>,
    pub sources: Vec<&'a str>,
}

pub(crate) fn blocks(body: &str) -> ParsedBody<'_> {
    let mut parsed = ParsedBody::default();
    let mut open: Option<Block<'_>> = None;
    let mut saw_blank = false;

    for line in body.lines() {
        let kind = classify(line);
        match kind {
            // A trailer moved out of the way still separates what it stood between.
            LineKind::Sources => {
                parsed.sources.push(line.trim());
                saw_blank = true;
            }
            LineKind::Blank => saw_blank = true,
            _ => {}
        }

        match BlockKind::of(kind) {
            Some(next) if open.as_ref().is_some_and(|b| b.kind == next) => {
                if let Some(block) = open.as_mut() {
                    block.lines.push(line);
                }
            }
            Some(next) => {
                parsed.blocks.extend(open.take());
                open = Some(Block {
                    kind: next,
                    lines: vec![line],
                    after_blank: std::mem::take(&mut saw_blank) && !parsed.blocks.is_empty(),
                });
            }
            None => parsed.blocks.extend(open.take()),
        }
    }
    parsed.blocks.extend(open);
    parsed
}
