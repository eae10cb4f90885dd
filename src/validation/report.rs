//! Result types for design validation.
//!
//! These are plain data: they serialize to JSON for programmatic use and
//! implement `Display` for the text report the CLI prints.

use std::fmt;

use serde::Serialize;

use crate::density::DensityResult;
use crate::layout::LayoutResult;
use crate::palette::{ContrastResult, PaletteResult};
use crate::typography::{DeckFontResult, FontCheck, PairingCheck, SizeCheck};

/// Typography part of a slide validation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypographyResult {
    pub heading_font: FontCheck,
    pub body_font: FontCheck,
    pub pairing: PairingCheck,
    pub sizes: SizeCheck,
}

/// The combined result of validating one slide in its theme.
///
/// `all_violations` lists every sub-check's violations in a fixed order:
/// palette, contrast, heading font, body font, pairing, sizes, density,
/// layout. `valid` is true exactly when that list is empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DesignValidationResult {
    pub valid: bool,
    pub color: PaletteResult,
    pub text_contrast: ContrastResult,
    pub typography: TypographyResult,
    pub density: DensityResult,
    pub layout: LayoutResult,
    pub all_violations: Vec<String>,
}

impl DesignValidationResult {
    pub fn violation_count(&self) -> usize {
        self.all_violations.len()
    }
}

impl fmt::Display for DesignValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all_violations.is_empty() {
            return writeln!(f, "Design validation passed: no violations found");
        }

        writeln!(
            f,
            "Design validation failed with {} violation(s):",
            self.violation_count()
        )?;
        writeln!(f)?;

        for violation in &self.all_violations {
            writeln!(f, "  - {}", violation)?;
        }

        Ok(())
    }
}

/// The result of validating every slide of a deck plus the deck font budget.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeckValidationReport {
    pub valid: bool,
    pub slides: Vec<DesignValidationResult>,
    pub fonts: DeckFontResult,
    /// Slide violations prefixed with `Slide N: ` (1-based), followed by
    /// the deck font violations.
    pub all_violations: Vec<String>,
}

impl DeckValidationReport {
    pub fn violation_count(&self) -> usize {
        self.all_violations.len()
    }

    /// Number of slides with at least one violation.
    pub fn failing_slides(&self) -> usize {
        self.slides.iter().filter(|s| !s.valid).count()
    }
}

impl fmt::Display for DeckValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all_violations.is_empty() {
            return writeln!(
                f,
                "Deck validation passed: {} slide(s), {} font(s), no violations found",
                self.slides.len(),
                self.fonts.distinct_fonts.len()
            );
        }

        writeln!(
            f,
            "Deck validation failed with {} violation(s) across {} of {} slide(s):",
            self.violation_count(),
            self.failing_slides(),
            self.slides.len()
        )?;
        writeln!(f)?;

        for violation in &self.all_violations {
            writeln!(f, "  - {}", violation)?;
        }

        Ok(())
    }
}
