//! Algorithmic repair of density and contrast violations.
//!
//! Density is fixed by splitting the slide (or, when that is not
//! possible, by moving overflow into speaker notes). Low text contrast is
//! fixed by switching the text color to black or white. Forbidden color
//! pairs need a human and are only flagged.

use serde::Serialize;
use tracing::info;

use crate::color::{round2, Rgb};
use crate::density::{suggest_split, truncate_to_limits, validate_slide_content};
use crate::model::{SlideContent, SlidePalette, Theme};
use crate::palette::{validate_palette, validate_text_contrast};
use crate::policy::DesignPolicy;

/// Prefix of change-log entries that describe a problem left unfixed.
pub const MANUAL_FIX_PREFIX: &str = "[Manual fix needed] ";

/// Outcome of [`auto_fix_slide`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AutoFixResult {
    /// True when `changes` is non-empty, manual-fix entries included.
    pub fixed: bool,
    pub changes: Vec<String>,
    /// The input slide, or its replacements after a split.
    pub slides: Vec<SlideContent>,
    /// Present only when the palette was changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<SlidePalette>,
}

impl AutoFixResult {
    /// Change-log entries that still need a person.
    pub fn manual_fixes(&self) -> impl Iterator<Item = &str> {
        self.changes
            .iter()
            .filter_map(|c| c.strip_prefix(MANUAL_FIX_PREFIX))
    }
}

/// Repairs what can be repaired and reports the rest.
///
/// The inputs are not modified. Steps run in order:
///
/// 1. density: split the slide, or truncate into speaker notes
/// 2. contrast: replace the text color with black or white, whichever
///    contrasts more with the background (black on a tie)
/// 3. palette: re-check the resulting palette and flag what is left
///
/// # Examples
///
/// ```
/// use deckguard::autofix::auto_fix_slide;
/// use deckguard::model::{SlideContent, SlideType, Theme};
/// use deckguard::policy::DesignPolicy;
///
/// let mut theme = Theme::default();
/// theme.palette.primary = "#1E3A8A".into();
/// theme.palette.secondary = "#64748B".into();
/// theme.palette.accent = "#0EA5E9".into();
/// theme.palette.background = "#999999".into();
/// theme.palette.text = "#777777".into();
///
/// let slide = SlideContent::new("Title", "Short body", SlideType::TitleAndContent);
/// let result = auto_fix_slide(&slide, &theme, &DesignPolicy::default());
/// assert_eq!(result.palette.unwrap().text, "#000000");
/// assert_eq!(result.changes.len(), 1);
/// ```
pub fn auto_fix_slide(slide: &SlideContent, theme: &Theme, policy: &DesignPolicy) -> AutoFixResult {
    let mut changes = Vec::new();
    let mut slides = vec![slide.clone()];

    if !validate_slide_content(slide, &policy.density).valid {
        fix_density(slide, policy, &mut slides, &mut changes);
    }

    let palette = fix_contrast(&theme.palette, policy, &mut changes);

    let current = palette.as_ref().unwrap_or(&theme.palette);
    for violation in validate_palette(current, &policy.palette).violations {
        info!(%violation, "flagged for manual fix");
        changes.push(format!("{MANUAL_FIX_PREFIX}{violation}"));
    }

    AutoFixResult {
        fixed: !changes.is_empty(),
        changes,
        slides,
        palette,
    }
}

fn fix_density(
    slide: &SlideContent,
    policy: &DesignPolicy,
    slides: &mut Vec<SlideContent>,
    changes: &mut Vec<String>,
) {
    let split = suggest_split(slide, &policy.density);
    if split.should_split {
        let change = format!(
            "Split slide into {} slides to satisfy density limits",
            split.new_slides.len()
        );
        info!(slides = split.new_slides.len(), "{change}");
        changes.push(change);
        *slides = split.new_slides;
        return;
    }

    let limits = policy.density.limits_for(slide.slide_type);
    if !limits.check().is_empty() {
        return;
    }
    let cut = truncate_to_limits(&slide.body, &limits);
    if !cut.was_truncated {
        return;
    }

    let notes = match slide.speaker_notes.as_deref().map(str::trim_end) {
        Some(existing) if !existing.is_empty() => format!("{existing}\n\n{}", cut.overflow),
        _ => cut.overflow,
    };
    let change = "Moved overflow content to speaker notes to satisfy density limits".to_string();
    info!(title = %slide.title, "{change}");
    changes.push(change);
    slides[0] = SlideContent {
        body: cut.body,
        speaker_notes: Some(notes),
        ..slide.clone()
    };
}

/// Returns the palette with a replaced text color, or `None` when the
/// contrast already passes or the background cannot be read.
fn fix_contrast(
    palette: &SlidePalette,
    policy: &DesignPolicy,
    changes: &mut Vec<String>,
) -> Option<SlidePalette> {
    if validate_text_contrast(&palette.text, &palette.background, &policy.palette).valid {
        return None;
    }
    let background = Rgb::from_hex(&palette.background).ok()?;

    let (replacement, ratio) = best_text_color(background);
    let old = Rgb::from_hex(&palette.text)
        .map(|rgb| rgb.to_hex())
        .unwrap_or_else(|_| palette.text.trim().to_string());

    let change = format!(
        "Changed text color from {old} to {replacement} (contrast {}:1)",
        round2(ratio)
    );
    info!("{change}");
    changes.push(change);

    Some(palette.with_text(replacement.to_hex()))
}

/// Black or white, whichever contrasts more with `background`.
///
/// One of the two always reaches 4.5:1 against any sRGB color.
pub fn best_text_color(background: Rgb) -> (Rgb, f64) {
    let on_black = Rgb::BLACK.contrast_ratio(background);
    let on_white = Rgb::WHITE.contrast_ratio(background);
    if on_black >= on_white {
        (Rgb::BLACK, on_black)
    } else {
        (Rgb::WHITE, on_white)
    }
}
