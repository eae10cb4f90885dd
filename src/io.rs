//! JSON input/output for slide documents and decks.
//!
//! The engine itself never touches the filesystem; these helpers are the
//! CLI's way in and out.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DeckguardError;
use crate::model::{Deck, SlideDocument};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DeckguardError> {
    let file = File::open(path).map_err(DeckguardError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| DeckguardError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a `{ "slide": ..., "theme": ... }` document from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_slide_document(path: &Path) -> Result<SlideDocument, DeckguardError> {
    read_json(path)
}

/// Reads a `{ "theme": ..., "slides": [...] }` deck from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_deck(path: &Path) -> Result<Deck, DeckguardError> {
    read_json(path)
}

/// Writes any report as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(writer: W, value: &T) -> Result<(), DeckguardError> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, value).map_err(DeckguardError::JsonWrite)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Parses a slide document from a JSON string.
///
/// Useful for testing without file I/O.
pub fn slide_document_from_str(json: &str) -> Result<SlideDocument, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parses a deck from a JSON string.
pub fn deck_from_str(json: &str) -> Result<Deck, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SlideType;

    #[test]
    fn slide_document_defaults() {
        let doc = slide_document_from_str(
            r##"{
                "slide": { "title": "Hello" },
                "theme": {
                    "palette": { "background": "#FFFFFF", "text": "#000000" },
                    "heading_font": "Inter",
                    "body_font": "Inter"
                }
            }"##,
        )
        .unwrap();
        assert_eq!(doc.slide.body, "");
        assert_eq!(doc.slide.slide_type, SlideType::TitleAndContent);
        assert_eq!(doc.theme.palette.primary, "");
        assert!(doc.theme.layout.is_none());
    }

    #[test]
    fn deck_from_str_reads_slide_themes() {
        let deck = deck_from_str(
            r##"{
                "theme": { "palette": {}, "heading_font": "Inter", "body_font": "Lora" },
                "slides": [
                    { "title": "One", "body": "- a", "slide_type": "bullets" },
                    { "title": "Two", "theme": { "palette": {}, "heading_font": "Roboto", "body_font": "Lato" } }
                ]
            }"##,
        )
        .unwrap();
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].content.slide_type, SlideType::Bullets);
        assert!(deck.slides[1].theme.is_some());
        assert_eq!(deck.all_fonts(), vec!["Inter", "Lora", "Roboto", "Lato"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_deck(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, DeckguardError::Io(_)));
    }

    #[test]
    fn parse_error_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = read_slide_document(&path).unwrap_err();
        assert!(matches!(err, DeckguardError::JsonParse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn write_json_appends_newline() {
        let mut out = Vec::new();
        write_json(&mut out, &serde_json::json!({ "ok": true })).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"ok\": true\n}\n");
    }
}
