//! Palette validation: forbidden color pairs and text contrast.

use serde::Serialize;

use crate::color::{round2, Rgb};
use crate::model::SlidePalette;
use crate::policy::{ForbiddenPair, PalettePolicy};

/// Outcome of scanning a whole palette.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PaletteResult {
    pub valid: bool,
    pub violations: Vec<String>,
}

/// Outcome of a text/background contrast check.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContrastResult {
    pub valid: bool,
    /// Rounded to two decimals; `0.0` when either color is malformed.
    pub ratio: f64,
    pub required: f64,
    pub violations: Vec<String>,
}

/// Outcome of checking one pair of colors.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PairCheck {
    pub valid: bool,
    /// Name of the matched forbidden pair, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forbidden: Option<String>,
    pub violations: Vec<String>,
}

/// Finds the forbidden pair `(a, b)` falls into, in either order.
///
/// Each color must lie within the policy's deltaE tolerance of one of the
/// entry's reference colors. Entries with malformed reference colors are
/// skipped; [`DesignPolicy::check`](crate::policy::DesignPolicy::check)
/// reports those.
pub fn find_forbidden_pair(a: Rgb, b: Rgb, policy: &PalettePolicy) -> Option<&ForbiddenPair> {
    let tolerance = policy.forbidden_pair_tolerance;
    let near = |x: Rgb, reference: Rgb| x.delta_e(reference) <= tolerance;

    policy.forbidden_pairs.iter().find(|pair| {
        let (Ok(first), Ok(second)) = (Rgb::from_hex(&pair.first), Rgb::from_hex(&pair.second))
        else {
            return false;
        };
        (near(a, first) && near(b, second)) || (near(a, second) && near(b, first))
    })
}

/// Checks a single pair of hex colors against the forbidden-pair table.
pub fn validate_color_pair(a: &str, b: &str, policy: &PalettePolicy) -> PairCheck {
    let mut violations = policy.check_pairs();
    let parsed_a = Rgb::from_hex(a).map_err(|e| violations.push(e.to_string())).ok();
    let parsed_b = Rgb::from_hex(b).map_err(|e| violations.push(e.to_string())).ok();

    let forbidden = match (parsed_a, parsed_b) {
        (Some(x), Some(y)) => find_forbidden_pair(x, y, policy).map(|pair| {
            violations.push(format!(
                "{x} and {y} form a forbidden {} color combination",
                pair.name
            ));
            pair.name.clone()
        }),
        _ => None,
    };

    PairCheck {
        valid: violations.is_empty(),
        forbidden,
        violations,
    }
}

/// Checks every unordered pair of palette roles against the forbidden-pair
/// table.
///
/// Roles that are missing or malformed produce one violation each and are
/// left out of the pair scan. A malformed tolerance or pair table is
/// reported before any role.
pub fn validate_palette(palette: &SlidePalette, policy: &PalettePolicy) -> PaletteResult {
    let mut violations = policy.check_pairs();
    let mut colors: Vec<(&str, Rgb)> = Vec::new();

    for (role, value) in palette.roles() {
        match Rgb::from_hex(value) {
            Ok(rgb) => colors.push((role, rgb)),
            Err(err) => violations.push(format!("Palette {role}: {err}")),
        }
    }

    for (i, (role_a, a)) in colors.iter().enumerate() {
        for (role_b, b) in &colors[i + 1..] {
            if let Some(pair) = find_forbidden_pair(*a, *b, policy) {
                violations.push(format!(
                    "Palette {role_a} ({a}) and {role_b} ({b}) form a forbidden {} color combination",
                    pair.name
                ));
            }
        }
    }

    PaletteResult {
        valid: violations.is_empty(),
        violations,
    }
}

/// Checks text against its background for the policy's minimum contrast.
pub fn validate_text_contrast(text: &str, background: &str, policy: &PalettePolicy) -> ContrastResult {
    let required = policy.min_text_contrast;
    let mut violations = policy.check_contrast();

    let fg = Rgb::from_hex(text).map_err(|e| violations.push(format!("Text color: {e}")));
    let bg = Rgb::from_hex(background).map_err(|e| violations.push(format!("Background color: {e}")));

    let ratio = match (fg, bg) {
        (Ok(fg), Ok(bg)) => {
            let ratio = round2(fg.contrast_ratio(bg));
            if ratio < required {
                violations.push(format!(
                    "Text contrast {ratio}:1 ({fg} on {bg}) is below the required {required}:1"
                ));
            }
            ratio
        }
        _ => 0.0,
    };

    ContrastResult {
        valid: violations.is_empty(),
        ratio,
        required,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_palette() -> SlidePalette {
        SlidePalette {
            primary: "#FF0000".into(),
            secondary: "#00FF00".into(),
            accent: "#0000FF".into(),
            background: "#FFFFFF".into(),
            text: "#000000".into(),
            surface: None,
        }
    }

    #[test]
    fn reports_red_green_pair() {
        let result = validate_palette(&rgb_palette(), &PalettePolicy::default());
        assert!(!result.valid);
        assert_eq!(result.violations.len(), 1, "{:?}", result.violations);
        assert!(result.violations[0].contains("red/green"));
        assert!(result.violations[0].contains("primary (#FF0000)"));
        assert!(result.violations[0].contains("secondary (#00FF00)"));
    }

    #[test]
    fn clean_palette_passes() {
        let palette = SlidePalette {
            primary: "#1E3A8A".into(),
            secondary: "#F59E0B".into(),
            accent: "#10B981".into(),
            background: "#FFFFFF".into(),
            text: "#111827".into(),
            surface: Some("#F3F4F6".into()),
        };
        let result = validate_palette(&palette, &PalettePolicy::default());
        assert!(result.valid, "{:?}", result.violations);
    }

    #[test]
    fn near_colors_match_within_tolerance() {
        // slightly off-red and off-green still match the red/green entry
        let check = validate_color_pair("#F00A0A", "#0AF00A", &PalettePolicy::default());
        assert!(!check.valid);
        assert_eq!(check.forbidden.as_deref(), Some("red/green"));

        // order does not matter
        let swapped = validate_color_pair("#00FF00", "#FF0000", &PalettePolicy::default());
        assert_eq!(swapped.forbidden.as_deref(), Some("red/green"));
    }

    #[test]
    fn zero_tolerance_requires_exact_colors() {
        let policy = PalettePolicy {
            forbidden_pair_tolerance: 0.0,
            ..Default::default()
        };
        assert!(validate_color_pair("#F00A0A", "#0AF00A", &policy).valid);
        assert!(!validate_color_pair("#ff0000", "#00ff00", &policy).valid);
    }

    #[test]
    fn malformed_roles_are_violations() {
        let mut palette = rgb_palette();
        palette.secondary = "green".into();
        palette.background = String::new();
        let result = validate_palette(&palette, &PalettePolicy::default());
        assert!(!result.valid);
        assert_eq!(result.violations.len(), 2, "{:?}", result.violations);
        assert!(result.violations[0].starts_with("Palette secondary: invalid color value"));
        assert_eq!(result.violations[1], "Palette background: missing color value");
    }

    #[test]
    fn black_on_white_contrast() {
        let result = validate_text_contrast("#000000", "#FFFFFF", &PalettePolicy::default());
        assert!(result.valid);
        assert_eq!(result.ratio, 21.0);
        assert_eq!(result.required, 4.5);
    }

    #[test]
    fn low_contrast_fails() {
        let result = validate_text_contrast("#777777", "#999999", &PalettePolicy::default());
        assert!(!result.valid);
        assert!(result.ratio < 4.5);
        assert_eq!(result.violations.len(), 1);
        assert!(result.violations[0].contains("below the required 4.5:1"));
    }

    #[test]
    fn malformed_contrast_input_is_a_violation() {
        let result = validate_text_contrast("#000000", "not-a-color", &PalettePolicy::default());
        assert!(!result.valid);
        assert_eq!(result.ratio, 0.0);
        assert!(result.violations[0].starts_with("Background color: invalid color value"));
    }

    #[test]
    fn nan_minimum_contrast_never_passes() {
        let policy = PalettePolicy {
            min_text_contrast: f64::NAN,
            ..Default::default()
        };
        let result = validate_text_contrast("#777777", "#999999", &policy);
        assert!(!result.valid);
        assert_eq!(result.ratio, 1.57);
        assert_eq!(
            result.violations,
            vec!["palette.min_text_contrast must be a number >= 1 (got NaN)"]
        );

        let negative = PalettePolicy {
            min_text_contrast: -1.0,
            ..Default::default()
        };
        assert!(!validate_text_contrast("#000000", "#FFFFFF", &negative).valid);
    }

    #[test]
    fn nan_tolerance_is_a_palette_violation() {
        let policy = PalettePolicy {
            forbidden_pair_tolerance: f64::NAN,
            ..Default::default()
        };
        let result = validate_palette(&rgb_palette(), &policy);
        assert!(!result.valid);
        assert!(result.violations[0].starts_with("palette.forbidden_pair_tolerance"));
    }

    #[test]
    fn pair_check_reports_bad_hex() {
        let check = validate_color_pair("#12", "#FFFFFF", &PalettePolicy::default());
        assert!(!check.valid);
        assert!(check.forbidden.is_none());
        assert_eq!(check.violations.len(), 1);
    }
}
