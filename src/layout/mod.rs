//! Layout complexity limits.
//!
//! A slide without a [`LayoutConfig`] has nothing to check and passes.

use serde::Serialize;

use crate::color::Rgb;
use crate::model::LayoutConfig;
use crate::policy::LayoutLimits;

/// Outcome of a layout check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LayoutResult {
    pub valid: bool,
    pub violations: Vec<String>,
}

impl LayoutResult {
    fn from_violations(violations: Vec<String>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }
}

/// Checks column count, font-size variety, color variety and image overlays.
///
/// Neutral colors (greys, near-black, near-white) do not count toward
/// `max_colors`. Colors that differ only in letter case are the same color.
///
/// # Examples
///
/// ```
/// use deckguard::layout::validate_layout;
/// use deckguard::model::LayoutConfig;
/// use deckguard::policy::LayoutLimits;
///
/// let layout = LayoutConfig { columns: Some(4), ..Default::default() };
/// let result = validate_layout(Some(&layout), &LayoutLimits::default());
/// assert_eq!(result.violations, vec!["Too many columns: 4 (max 3)"]);
/// ```
pub fn validate_layout(layout: Option<&LayoutConfig>, limits: &LayoutLimits) -> LayoutResult {
    let mut violations = limits.check();
    let Some(layout) = layout else {
        return LayoutResult::from_violations(violations);
    };

    if let Some(columns) = layout.columns {
        if columns < 1 {
            violations.push(format!("Invalid column count: {columns}"));
        } else if columns > limits.max_columns {
            violations.push(format!(
                "Too many columns: {columns} (max {})",
                limits.max_columns
            ));
        }
    }

    let mut sizes: Vec<f64> = Vec::new();
    for &size in &layout.font_sizes {
        if !size.is_finite() || size <= 0.0 {
            violations.push(format!("Invalid font size: {size}"));
        } else if !sizes.contains(&size) {
            sizes.push(size);
        }
    }
    if sizes.len() > limits.max_font_sizes {
        violations.push(format!(
            "Too many font sizes: {} (max {})",
            sizes.len(),
            limits.max_font_sizes
        ));
    }

    let mut colors: Vec<Rgb> = Vec::new();
    for value in &layout.distinct_colors {
        match Rgb::from_hex(value) {
            Ok(rgb) if rgb.is_neutral() => {}
            Ok(rgb) => {
                if !colors.contains(&rgb) {
                    colors.push(rgb);
                }
            }
            Err(err) => violations.push(format!("Layout color: {err}")),
        }
    }
    if colors.len() > limits.max_colors {
        violations.push(format!(
            "Too many colors: {} non-neutral (max {})",
            colors.len(),
            limits.max_colors
        ));
    }

    if let Some(opacity) = layout.overlay_opacity {
        if !(0.0..=1.0).contains(&opacity) {
            violations.push(format!("Invalid overlay opacity: {opacity}"));
        }
    }
    if layout.has_full_bleed_image {
        match layout.overlay_opacity {
            None => violations.push(format!(
                "Full-bleed image needs an overlay of at least {} opacity behind text",
                limits.min_overlay_opacity
            )),
            Some(opacity) if (0.0..=1.0).contains(&opacity) && opacity < limits.min_overlay_opacity => {
                violations.push(format!(
                    "Overlay opacity {opacity} on full-bleed image is below the minimum {}",
                    limits.min_overlay_opacity
                ));
            }
            Some(_) => {}
        }
    }

    LayoutResult::from_violations(violations)
}
