//! Splitting an over-dense slide into several slides.
//!
//! The body is cut into atomic units (one list item, one paragraph line,
//! one table data row) and packed fill-first: each output slide takes
//! units until the next one would break a limit. Tables keep their header
//! on every slide they continue onto, and headings travel with the unit
//! that follows them.

use serde::Serialize;
use tracing::trace;

use crate::model::SlideContent;
use crate::policy::{DensityLimits, DensityPolicy};

use super::scan::{blocks, classify, line_words, Block, BlockKind, LineKind};
use super::{validate_body, validate_slide_content};

/// Proposed replacement slides for an over-dense slide.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SplitSuggestion {
    pub should_split: bool,
    /// Empty unless `should_split` is set.
    pub new_slides: Vec<SlideContent>,
}

#[derive(Clone, Debug)]
struct Unit {
    lines: Vec<String>,
    bullets: usize,
    words: usize,
    /// Index into the table headers for table data rows.
    table: Option<usize>,
    gap_before: bool,
    keep_with_next: bool,
}

#[derive(Clone, Debug, Default)]
struct TableHeader {
    lines: Vec<String>,
    words: usize,
}

#[derive(Clone, Debug, Default)]
struct Page {
    lines: Vec<String>,
    bullets: usize,
    words: usize,
    /// Table the page currently ends in, with its data-row count.
    table: Option<(usize, usize)>,
}

impl Page {
    fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn header_words(&self, unit: &Unit, headers: &[TableHeader]) -> usize {
        match unit.table {
            Some(id) if self.table.map(|(t, _)| t) != Some(id) => headers[id].words,
            _ => 0,
        }
    }

    fn can_take(&self, unit: &Unit, headers: &[TableHeader], limits: &DensityLimits) -> bool {
        let words = self.words + unit.words + self.header_words(unit, headers);
        let rows_ok = match (unit.table, self.table) {
            (Some(id), Some((t, rows))) if id == t => rows < limits.max_table_rows,
            _ => true,
        };
        self.bullets + unit.bullets <= limits.max_bullets && words <= limits.max_words && rows_ok
    }

    fn take(&mut self, unit: &Unit, headers: &[TableHeader]) {
        if unit.gap_before && !self.is_empty() {
            self.lines.push(String::new());
        }
        match unit.table {
            Some(id) => {
                let rows = match self.table {
                    Some((t, rows)) if t == id => rows,
                    _ => {
                        self.lines.extend(headers[id].lines.iter().cloned());
                        self.words += headers[id].words;
                        0
                    }
                };
                self.table = Some((id, rows + 1));
            }
            None => self.table = None,
        }
        self.lines.extend(unit.lines.iter().cloned());
        self.bullets += unit.bullets;
        self.words += unit.words;
    }
}

/// Breaks a prose or list line longer than `max_words` into several lines,
/// each repeating the original marker.
///
/// `text` is the line's content after its marker. Plain paragraph chunks
/// that would read as a marker line on their own (`- cost`, `2. late`,
/// `| x`) get a markdown backslash escape so they stay paragraphs.
fn chunk_line(line: &str, kind: LineKind<'_>, text: &str, max_words: usize) -> Vec<String> {
    let content_end = line.trim_end().len();
    let prefix = &line[..content_end.saturating_sub(text.len())];
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut counted = 0;

    let mut emit = |tokens: &[&str]| {
        let mut chunk = tokens.join(" ");
        if matches!(kind, LineKind::Paragraph(_)) && !matches!(classify(&chunk), LineKind::Paragraph(_)) {
            chunk.insert(0, '\\');
        }
        chunks.push(format!("{prefix}{chunk}"));
    };

    for token in text.split_whitespace() {
        current.push(token);
        if token.chars().any(char::is_alphanumeric) {
            counted += 1;
        }
        if counted == max_words {
            emit(current.as_slice());
            current.clear();
            counted = 0;
        }
    }
    if !current.is_empty() {
        emit(current.as_slice());
    }
    chunks
}

fn line_units(block: &Block<'_>, limits: &DensityLimits, units: &mut Vec<Unit>) {
    for (i, line) in block.lines.iter().enumerate() {
        let kind = classify(line);
        let pieces = match kind {
            LineKind::Bullet(text)
            | LineKind::Numbered(text)
            | LineKind::Heading(text)
            | LineKind::Quote(text)
            | LineKind::Paragraph(text)
                if line_words(kind) > limits.max_words =>
            {
                chunk_line(line, kind, text, limits.max_words)
            }
            _ => vec![(*line).to_string()],
        };

        for (j, piece) in pieces.into_iter().enumerate() {
            // Counted from the emitted line so pages agree with a rescan.
            let piece_kind = classify(&piece);
            units.push(Unit {
                bullets: usize::from(piece_kind.is_list_item()),
                words: line_words(piece_kind),
                table: None,
                gap_before: block.after_blank && i == 0 && j == 0,
                keep_with_next: matches!(kind, LineKind::Heading(_)),
                lines: vec![piece],
            });
        }
    }
}

fn table_units(
    block: &Block<'_>,
    headers: &mut Vec<TableHeader>,
    units: &mut Vec<Unit>,
) {
    let kinds: Vec<LineKind<'_>> = block.lines.iter().map(|l| classify(l)).collect();

    let header_len = match kinds.as_slice() {
        [LineKind::TableSeparator, ..] => 1,
        [LineKind::TableRow(_), LineKind::TableSeparator, ..] => 2,
        _ => 0,
    };

    let id = headers.len();
    headers.push(TableHeader {
        lines: block.lines[..header_len].iter().map(|l| (*l).to_string()).collect(),
        words: kinds[..header_len].iter().map(|k| line_words(*k)).sum(),
    });

    let first_unit = units.len();
    for (line, kind) in block.lines.iter().zip(&kinds).skip(header_len) {
        match kind {
            LineKind::TableRow(_) => units.push(Unit {
                lines: vec![(*line).to_string()],
                bullets: 0,
                words: line_words(*kind),
                table: Some(id),
                gap_before: false,
                keep_with_next: false,
            }),
            // A stray alignment row rides along with the row before it.
            _ => {
                if let Some(prev) = units[first_unit..].last_mut() {
                    prev.lines.push((*line).to_string());
                }
            }
        }
    }

    if units.len() == first_unit {
        // Header-only table: keep it as plain content.
        let header = &headers[id];
        units.push(Unit {
            lines: header.lines.clone(),
            bullets: 0,
            words: header.words,
            table: None,
            gap_before: block.after_blank,
            keep_with_next: false,
        });
    } else {
        units[first_unit].gap_before = block.after_blank;
    }
}

/// Proposes how to split a slide that fails its density limits.
///
/// Output slides keep the slide type, are titled `"<title> (i/n)"`, and
/// each satisfies the limits on its own. List items and paragraphs over
/// the word limit are broken into several lines. A table row that cannot
/// fit on any slide (with its header) makes the slide unsplittable, and
/// `should_split` stays false.
pub fn suggest_split(slide: &SlideContent, policy: &DensityPolicy) -> SplitSuggestion {
    let limits = policy.limits_for(slide.slide_type);
    if !limits.check().is_empty() || validate_slide_content(slide, policy).valid {
        return SplitSuggestion::default();
    }

    let parsed = blocks(&slide.body);
    let mut headers: Vec<TableHeader> = Vec::new();
    let mut units: Vec<Unit> = Vec::new();
    for block in &parsed.blocks {
        match block.kind {
            BlockKind::Table => table_units(block, &mut headers, &mut units),
            _ => line_units(block, &limits, &mut units),
        }
    }

    let pages = pack(&units, &headers, &limits);
    trace!(units = units.len(), pages = pages.len(), "packed slide body");
    if pages.len() < 2 {
        return SplitSuggestion::default();
    }

    let total = pages.len();
    let new_slides: Vec<SlideContent> = pages
        .into_iter()
        .enumerate()
        .map(|(i, mut page)| {
            if i + 1 == total && !parsed.sources.is_empty() {
                page.lines.push(String::new());
                page.lines.extend(parsed.sources.iter().map(|s| (*s).to_string()));
            }
            SlideContent {
                title: format!("{} ({}/{})", slide.title, i + 1, total)
                    .trim_start()
                    .to_string(),
                body: page.lines.join("\n"),
                slide_type: slide.slide_type,
                speaker_notes: if i == 0 { slide.speaker_notes.clone() } else { None },
            }
        })
        .collect();

    if let Some(over) = new_slides
        .iter()
        .position(|s| !validate_body(&s.body, &limits).valid)
    {
        trace!(page = over + 1, "split page still over its limits");
        return SplitSuggestion::default();
    }

    SplitSuggestion {
        should_split: true,
        new_slides,
    }
}

fn pack(units: &[Unit], headers: &[TableHeader], limits: &DensityLimits) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut page = Page::default();
    let mut i = 0;

    while i < units.len() {
        // A run of headings plus the unit they introduce.
        let mut end = i;
        while end < units.len() && units[end].keep_with_next {
            end += 1;
        }
        let group = &units[i..(end + 1).min(units.len())];

        let group_fits = |start: &Page| {
            let mut probe = start.clone();
            group.iter().all(|unit| {
                let ok = probe.can_take(unit, headers, limits);
                probe.take(unit, headers);
                ok
            })
        };

        if !page.is_empty() && !group_fits(&page) {
            pages.push(std::mem::take(&mut page));
        }

        if group_fits(&page) {
            for unit in group {
                page.take(unit, headers);
            }
        } else {
            for unit in group {
                if !page.is_empty() && !page.can_take(unit, headers, limits) {
                    pages.push(std::mem::take(&mut page));
                }
                page.take(unit, headers);
            }
        }

        i += group.len();
    }

    if !page.is_empty() {
        pages.push(page);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::list_items;
    use crate::model::SlideType;

    fn policy(max_bullets: usize, max_words: usize, max_table_rows: usize) -> DensityPolicy {
        DensityPolicy::uniform(DensityLimits {
            max_bullets,
            max_words,
            max_table_rows,
        })
    }

    #[test]
    fn six_bullets_split_four_and_two() {
        let slide = SlideContent::new(
            "Roadmap",
            "- one\n- two\n- three\n- four\n- five\n- six",
            SlideType::Bullets,
        );
        let split = suggest_split(&slide, &policy(4, 90, 6));
        assert!(split.should_split);
        assert_eq!(split.new_slides.len(), 2);
        assert_eq!(split.new_slides[0].body, "- one\n- two\n- three\n- four");
        assert_eq!(split.new_slides[1].body, "- five\n- six");
        assert_eq!(split.new_slides[0].title, "Roadmap (1/2)");
        assert_eq!(split.new_slides[1].title, "Roadmap (2/2)");
        assert!(split.new_slides.iter().all(|s| s.slide_type == SlideType::Bullets));
    }

    #[test]
    fn passing_slide_is_not_split() {
        let slide = SlideContent::new("Short", "- a\n- b", SlideType::Bullets);
        let split = suggest_split(&slide, &policy(4, 90, 6));
        assert!(!split.should_split);
        assert!(split.new_slides.is_empty());
    }

    #[test]
    fn table_header_repeats_on_continuation() {
        let body = "| Region | Sales |\n|---|---|\n| North | 1 |\n| South | 2 |\n| East | 3 |";
        let slide = SlideContent::new("Sales", body, SlideType::Table);
        let split = suggest_split(&slide, &policy(6, 90, 2));
        assert_eq!(split.new_slides.len(), 2);
        assert_eq!(
            split.new_slides[1].body,
            "| Region | Sales |\n|---|---|\n| East | 3 |"
        );
        for s in &split.new_slides {
            assert!(validate_body(&s.body, &DensityLimits { max_table_rows: 2, ..Default::default() }).valid);
        }
    }

    #[test]
    fn heading_moves_with_its_list() {
        let body = "- a\n- b\n- c\n\n## Next steps\n- d\n- e";
        let slide = SlideContent::new("Plan", body, SlideType::Bullets);
        let split = suggest_split(&slide, &policy(3, 90, 6));
        assert_eq!(split.new_slides.len(), 2);
        assert_eq!(split.new_slides[0].body, "- a\n- b\n- c");
        assert_eq!(split.new_slides[1].body, "## Next steps\n- d\n- e");
    }

    #[test]
    fn long_paragraph_is_chunked_by_words() {
        let body = vec!["word"; 25].join(" ");
        let slide = SlideContent::new("Essay", body, SlideType::TitleAndContent);
        let split = suggest_split(&slide, &policy(6, 10, 6));
        assert_eq!(split.new_slides.len(), 3);
        for s in &split.new_slides {
            assert!(validate_body(&s.body, &DensityLimits { max_words: 10, ..Default::default() }).valid);
        }
    }

    #[test]
    fn sources_land_on_last_slide() {
        let body = "- a\n- b\n- c\nSources: Annual report";
        let slide = SlideContent::new("Facts", body, SlideType::Bullets);
        let split = suggest_split(&slide, &policy(2, 90, 6));
        assert_eq!(split.new_slides.len(), 2);
        assert!(!split.new_slides[0].body.contains("Sources"));
        assert!(split.new_slides[1].body.ends_with("\n\nSources: Annual report"));
    }

    #[test]
    fn oversize_table_row_makes_slide_unsplittable() {
        let row = "| one two three four five six seven eight nine ten eleven twelve |";
        let body = format!("- a\n- b\n- c\n\n{row}");
        let slide = SlideContent::new("Mixed", body, SlideType::Bullets);
        let split = suggest_split(&slide, &policy(2, 10, 6));
        assert!(!split.should_split);
        assert!(split.new_slides.is_empty());
    }

    #[test]
    fn paragraph_chunks_never_become_list_items() {
        let body = "We ranked options by - cost speed and risk 2. came last";
        let slide = SlideContent::new("Method", body, SlideType::TitleAndContent);
        let split = suggest_split(&slide, &policy(6, 4, 6));
        assert!(split.should_split);

        let lines: Vec<&str> = split.new_slides.iter().map(|s| s.body.as_str()).collect();
        assert_eq!(
            lines,
            vec!["We ranked options by", "\\- cost speed and risk", "\\2. came last"]
        );
        assert!(split.new_slides.iter().all(|s| list_items(&s.body).is_empty()));
    }

    #[test]
    fn long_bullet_chunks_keep_their_marker() {
        let slide = SlideContent::new("Notes", "- - a b c d e", SlideType::Bullets);
        let split = suggest_split(&slide, &policy(6, 2, 6));
        let items: Vec<&str> = split.new_slides.iter().flat_map(|s| list_items(&s.body)).collect();
        assert_eq!(items, vec!["- a b", "c d", "e"]);
    }

    #[test]
    fn bullet_order_is_preserved() {
        let body: Vec<String> = (1..=11).map(|i| format!("{i}. item {i}")).collect();
        let body = body.join("\n");
        let slide = SlideContent::new("Steps", body.clone(), SlideType::NumberedList);
        let split = suggest_split(&slide, &policy(4, 90, 6));
        assert_eq!(split.new_slides.len(), 3);
        let joined: Vec<String> = split
            .new_slides
            .iter()
            .flat_map(|s| list_items(&s.body).into_iter().map(str::to_string).collect::<Vec<_>>())
            .collect();
        assert_eq!(joined, list_items(&body));
    }
}
