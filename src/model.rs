//! Slide, theme and deck types consumed by the engine.
//!
//! These are plain request-scoped values. Colors stay as the caller's hex
//! strings so that malformed input survives deserialization and can be
//! reported as a violation rather than rejected up front.

use serde::{Deserialize, Serialize};

/// Named slide layouts produced by the generation pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideType {
    Title,
    SectionHeader,
    #[default]
    TitleAndContent,
    Bullets,
    NumberedList,
    TwoColumn,
    Comparison,
    Table,
    Chart,
    Quote,
    Image,
    ImageWithCaption,
    FullBleedImage,
    Timeline,
    Process,
    Agenda,
    Summary,
    KeyTakeaways,
    Statistics,
    BigNumber,
    Team,
    Testimonial,
    CaseStudy,
    ProsCons,
    Faq,
    CallToAction,
    ThankYou,
    Blank,
    Diagram,
    Code,
}

/// The content of one slide.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideContent {
    pub title: String,

    /// Markdown-subset body: bullets, numbered items, table rows,
    /// headings, quotes and paragraphs.
    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub slide_type: SlideType,

    /// Presenter notes; truncation moves overflowing content here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_notes: Option<String>,
}

impl SlideContent {
    /// Creates a slide without speaker notes.
    pub fn new(title: impl Into<String>, body: impl Into<String>, slide_type: SlideType) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            slide_type,
            speaker_notes: None,
        }
    }
}

/// Named color roles of a theme.
///
/// Missing roles deserialize to empty strings and are reported as
/// violations by the palette validator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlidePalette {
    #[serde(default)]
    pub primary: String,
    #[serde(default)]
    pub secondary: String,
    #[serde(default)]
    pub accent: String,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
}

impl SlidePalette {
    /// Role name and value pairs in declaration order.
    ///
    /// `surface` is included only when set.
    pub fn roles(&self) -> Vec<(&'static str, &str)> {
        let mut roles = vec![
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("accent", self.accent.as_str()),
            ("background", self.background.as_str()),
            ("text", self.text.as_str()),
        ];
        if let Some(surface) = &self.surface {
            roles.push(("surface", surface.as_str()));
        }
        roles
    }

    /// Returns a copy with a different text color.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }
}

/// Point sizes per text role. Absent roles are not checked.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FontSizes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footnote: Option<f64>,
}

/// Layout facts about a rendered slide.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Signed so that nonsense input is reported, not rejected at parse time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub font_sizes: Vec<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub distinct_colors: Vec<String>,

    #[serde(default)]
    pub has_full_bleed_image: bool,

    /// Opacity of the scrim over a full-bleed image, `0.0..=1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_opacity: Option<f64>,
}

/// A visual theme.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub palette: SlidePalette,
    pub heading_font: String,
    pub body_font: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<FontSizes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutConfig>,
}

/// A single slide paired with the theme it is rendered in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideDocument {
    pub slide: SlideContent,
    pub theme: Theme,
}

/// A slide within a deck, optionally overriding the deck theme.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckSlide {
    #[serde(flatten)]
    pub content: SlideContent,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

/// A whole presentation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub theme: Theme,
    #[serde(default)]
    pub slides: Vec<DeckSlide>,
}

impl Deck {
    /// Every font family referenced by the deck theme and slide overrides,
    /// in first-use order, duplicates included.
    pub fn all_fonts(&self) -> Vec<&str> {
        let mut fonts = vec![
            self.theme.heading_font.as_str(),
            self.theme.body_font.as_str(),
        ];
        for theme in self.slides.iter().filter_map(|s| s.theme.as_ref()) {
            fonts.push(theme.heading_font.as_str());
            fonts.push(theme.body_font.as_str());
        }
        fonts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_type_uses_kebab_case() {
        let json = serde_json::to_string(&SlideType::TwoColumn).unwrap();
        assert_eq!(json, "\"two-column\"");
        let parsed: SlideType = serde_json::from_str("\"full-bleed-image\"").unwrap();
        assert_eq!(parsed, SlideType::FullBleedImage);
    }

    #[test]
    fn missing_palette_roles_become_empty() {
        let palette: SlidePalette =
            serde_json::from_str(r##"{"primary":"#112233","text":"#000000"}"##).unwrap();
        assert_eq!(palette.background, "");
        assert_eq!(palette.roles().len(), 5);
    }

    #[test]
    fn surface_role_is_optional() {
        let mut palette = SlidePalette::default();
        assert!(palette.roles().iter().all(|(name, _)| *name != "surface"));
        palette.surface = Some("#EEEEEE".into());
        assert_eq!(palette.roles().last(), Some(&("surface", "#EEEEEE")));
    }

    #[test]
    fn with_text_leaves_original_untouched() {
        let palette = SlidePalette {
            text: "#777777".into(),
            ..Default::default()
        };
        let fixed = palette.with_text("#000000");
        assert_eq!(palette.text, "#777777");
        assert_eq!(fixed.text, "#000000");
    }

    #[test]
    fn deck_slides_flatten_content() {
        let deck: Deck = serde_json::from_str(
            r##"{
                "theme": {"palette": {}, "heading_font": "Inter", "body_font": "Lora"},
                "slides": [
                    {"title": "Intro", "body": "- a", "slide_type": "bullets"},
                    {"title": "Next", "theme": {"palette": {}, "heading_font": "Oswald", "body_font": "Lora"}}
                ]
            }"##,
        )
        .unwrap();
        assert_eq!(deck.slides[0].content.slide_type, SlideType::Bullets);
        assert_eq!(deck.slides[1].content.body, "");
        assert_eq!(deck.all_fonts(), vec!["Inter", "Lora", "Oswald", "Lora"]);
    }
}
