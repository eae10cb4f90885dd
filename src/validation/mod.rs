//! Design validation for deckguard.
//!
//! This module composes the individual validators into one decision:
//! - Palette: forbidden color pairs and text contrast
//! - Typography: approved fonts, pairing and minimum sizes
//! - Density: bullets, words and table rows
//! - Layout: columns, font-size and color variety, image overlays
//!
//! Nothing here fails; malformed input becomes a violation in the result.

mod report;

pub use report::{DeckValidationReport, DesignValidationResult, TypographyResult};

use tracing::debug;

use crate::density::validate_slide_content;
use crate::layout::validate_layout;
use crate::model::{Deck, SlideContent, Theme};
use crate::palette::{validate_palette, validate_text_contrast};
use crate::policy::DesignPolicy;
use crate::typography::{
    validate_deck_fonts, validate_font_choice, validate_font_pairing, validate_font_sizes, SizeCheck,
};

/// Validates one slide rendered in `theme`.
///
/// Every check runs regardless of earlier failures, so the result always
/// carries the full picture.
///
/// # Examples
///
/// ```
/// use deckguard::model::{SlideContent, SlidePalette, SlideType, Theme};
/// use deckguard::policy::DesignPolicy;
/// use deckguard::validation::validate_slide_design;
///
/// let theme = Theme {
///     palette: SlidePalette {
///         primary: "#1E3A8A".into(),
///         secondary: "#64748B".into(),
///         accent: "#F59E0B".into(),
///         background: "#FFFFFF".into(),
///         text: "#111827".into(),
///         surface: None,
///     },
///     heading_font: "Montserrat".into(),
///     body_font: "Open Sans".into(),
///     ..Default::default()
/// };
/// let slide = SlideContent::new("Agenda", "- Intro\n- Results", SlideType::Bullets);
///
/// let result = validate_slide_design(&slide, &theme, &DesignPolicy::default());
/// assert!(result.valid, "{:?}", result.all_violations);
/// ```
pub fn validate_slide_design(
    slide: &SlideContent,
    theme: &Theme,
    policy: &DesignPolicy,
) -> DesignValidationResult {
    let color = validate_palette(&theme.palette, &policy.palette);
    let text_contrast = validate_text_contrast(
        &theme.palette.text,
        &theme.palette.background,
        &policy.palette,
    );

    let typography = TypographyResult {
        heading_font: validate_font_choice(&theme.heading_font, &policy.typography),
        body_font: validate_font_choice(&theme.body_font, &policy.typography),
        pairing: validate_font_pairing(&theme.heading_font, &theme.body_font, &policy.typography),
        sizes: match &theme.sizes {
            Some(sizes) => validate_font_sizes(sizes, &policy.typography),
            None => SizeCheck {
                valid: true,
                violations: Vec::new(),
            },
        },
    };

    let density = validate_slide_content(slide, &policy.density);
    let layout = validate_layout(theme.layout.as_ref(), &policy.layout);

    let mut all_violations = Vec::new();
    all_violations.extend(color.violations.iter().cloned());
    all_violations.extend(text_contrast.violations.iter().cloned());
    all_violations.extend(
        typography
            .heading_font
            .violations
            .iter()
            .map(|v| format!("Heading font: {v}")),
    );
    all_violations.extend(
        typography
            .body_font
            .violations
            .iter()
            .map(|v| format!("Body font: {v}")),
    );
    all_violations.extend(typography.pairing.violations.iter().cloned());
    all_violations.extend(typography.sizes.violations.iter().cloned());
    all_violations.extend(density.violations.iter().cloned());
    all_violations.extend(layout.violations.iter().cloned());

    debug!(
        title = %slide.title,
        slide_type = ?slide.slide_type,
        violations = all_violations.len(),
        "validated slide design"
    );

    DesignValidationResult {
        valid: all_violations.is_empty(),
        color,
        text_contrast,
        typography,
        density,
        layout,
        all_violations,
    }
}

/// Validates every slide of a deck, then the deck-wide font budget.
///
/// Slides with their own theme are checked against it; the rest use the
/// deck theme.
pub fn validate_deck(deck: &Deck, policy: &DesignPolicy) -> DeckValidationReport {
    let slides: Vec<DesignValidationResult> = deck
        .slides
        .iter()
        .map(|s| validate_slide_design(&s.content, s.theme.as_ref().unwrap_or(&deck.theme), policy))
        .collect();

    let all_fonts = deck.all_fonts();
    let fonts = validate_deck_fonts(all_fonts.as_slice(), &policy.typography);

    let mut all_violations: Vec<String> = slides
        .iter()
        .enumerate()
        .flat_map(|(i, result)| {
            result
                .all_violations
                .iter()
                .map(move |v| format!("Slide {}: {v}", i + 1))
        })
        .collect();
    all_violations.extend(fonts.violations.iter().cloned());

    debug!(
        slides = slides.len(),
        fonts = fonts.distinct_fonts.len(),
        violations = all_violations.len(),
        "validated deck"
    );

    DeckValidationReport {
        valid: all_violations.is_empty(),
        slides,
        fonts,
        all_violations,
    }
}
