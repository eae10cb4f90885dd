//! Typography rules: approved fonts, heading/body pairing, minimum sizes,
//! and the deck-wide font budget.
//!
//! Font names are compared case-insensitively. When a CSS font stack is
//! given (`"Inter", Helvetica, sans-serif`) only the first family counts.

use serde::Serialize;

use crate::model::FontSizes;
use crate::policy::{AllowedFont, FontCategory, TypographyPolicy};

/// Outcome of checking one font against the allow-list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FontCheck {
    pub valid: bool,
    pub font: String,
    /// Closest approved font when `font` is not approved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub violations: Vec<String>,
}

/// Outcome of the heading/body pairing rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PairingCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub violations: Vec<String>,
}

/// Outcome of the minimum font size check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SizeCheck {
    pub valid: bool,
    pub violations: Vec<String>,
}

/// Outcome of the deck-wide font budget check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DeckFontResult {
    pub valid: bool,
    /// Distinct families in first-use order.
    pub distinct_fonts: Vec<String>,
    pub violations: Vec<String>,
}

/// The first family of a font stack, unquoted and trimmed.
pub fn primary_family(font: &str) -> &str {
    font.split(',')
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
}

fn lookup<'a>(family: &str, policy: &'a TypographyPolicy) -> Option<&'a AllowedFont> {
    policy
        .allowed_fonts
        .iter()
        .find(|f| f.family.eq_ignore_ascii_case(family))
}

/// Guesses the category of a font from its name.
pub fn infer_category(family: &str) -> FontCategory {
    let name = family.to_ascii_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| name.contains(w));

    if has(&["mono", "code", "courier", "consol", "menlo"]) {
        FontCategory::Mono
    } else if has(&["display", "impact", "script", "brush", "fatface", "comic", "decorative", "handwriting"]) {
        FontCategory::Display
    } else if !name.contains("sans")
        && has(&["serif", "times", "garamond", "baskerville", "georgia", "caslon", "bodoni", "didot", "cambria", "palatino"])
    {
        FontCategory::Serif
    } else {
        FontCategory::Sans
    }
}

/// Category of a font: its allow-list entry if present, otherwise inferred.
pub fn font_category(font: &str, policy: &TypographyPolicy) -> FontCategory {
    let family = primary_family(font);
    lookup(family, policy).map_or_else(|| infer_category(family), |f| f.category)
}

/// Alphabetically first approved font of a category.
fn suggest(category: FontCategory, policy: &TypographyPolicy) -> Option<&str> {
    let by_name = |f: &&AllowedFont| f.family.to_ascii_lowercase();
    policy
        .allowed_fonts
        .iter()
        .filter(|f| f.category == category)
        .min_by_key(by_name)
        .or_else(|| policy.allowed_fonts.iter().min_by_key(by_name))
        .map(|f| f.family.as_str())
}

/// Checks a font against the allow-list.
///
/// # Examples
///
/// ```
/// use deckguard::policy::TypographyPolicy;
/// use deckguard::typography::validate_font_choice;
///
/// let policy = TypographyPolicy::default();
/// assert!(validate_font_choice("inter", &policy).valid);
///
/// let check = validate_font_choice("Times New Roman", &policy);
/// assert!(!check.valid);
/// assert_eq!(check.suggestion.as_deref(), Some("Georgia"));
/// ```
pub fn validate_font_choice(font: &str, policy: &TypographyPolicy) -> FontCheck {
    let family = primary_family(font);

    if family.is_empty() {
        return FontCheck {
            valid: false,
            font: font.to_string(),
            suggestion: suggest(FontCategory::Sans, policy).map(str::to_string),
            violations: vec!["No font family given".to_string()],
        };
    }

    if lookup(family, policy).is_some() {
        return FontCheck {
            valid: true,
            font: family.to_string(),
            suggestion: None,
            violations: Vec::new(),
        };
    }

    let suggestion = suggest(infer_category(family), policy).map(str::to_string);
    let message = match &suggestion {
        Some(s) => format!("Font '{family}' is not in the approved font list (try '{s}')"),
        None => format!("Font '{family}' is not in the approved font list"),
    };

    FontCheck {
        valid: false,
        font: family.to_string(),
        suggestion,
        violations: vec![message],
    }
}

/// Checks whether a heading font and a body font work together.
pub fn validate_font_pairing(heading_font: &str, body_font: &str, policy: &TypographyPolicy) -> PairingCheck {
    let heading = primary_family(heading_font);
    let body = primary_family(body_font);
    let heading_cat = font_category(heading, policy);
    let body_cat = font_category(body, policy);

    let reason = if heading.eq_ignore_ascii_case(body) {
        None
    } else if heading_cat == FontCategory::Display && body_cat == FontCategory::Display {
        Some(format!(
            "Two display fonts ('{heading}' and '{body}') compete for attention"
        ))
    } else if body_cat == FontCategory::Display {
        Some(format!(
            "Display font '{body}' is not legible at body text sizes"
        ))
    } else if body_cat == FontCategory::Mono && heading_cat != FontCategory::Mono {
        Some(format!(
            "Monospace body font '{body}' does not pair with {heading_cat} heading font '{heading}'"
        ))
    } else if heading_cat == FontCategory::Serif && body_cat == FontCategory::Serif {
        Some(format!(
            "Two different serif families ('{heading}' and '{body}') clash"
        ))
    } else {
        None
    };

    PairingCheck {
        valid: reason.is_none(),
        violations: reason.iter().cloned().collect(),
        reason,
    }
}

/// Checks every set size against its role's minimum.
pub fn validate_font_sizes(sizes: &FontSizes, policy: &TypographyPolicy) -> SizeCheck {
    let minimums = policy.size_minimums.roles();
    let actual = [
        sizes.title,
        sizes.subtitle,
        sizes.heading,
        sizes.body,
        sizes.caption,
        sizes.footnote,
    ];

    let violations: Vec<String> = minimums
        .iter()
        .zip(actual)
        .filter_map(|((role, min), size)| {
            let size = size?;
            if !size.is_finite() || size <= 0.0 {
                Some(format!("Invalid {role} font size: {size}"))
            } else if size < *min {
                Some(format!(
                    "{} font size {size}pt is below the minimum {min}pt",
                    capitalize(role)
                ))
            } else {
                None
            }
        })
        .collect();

    SizeCheck {
        valid: violations.is_empty(),
        violations,
    }
}

/// Checks the number of distinct font families used across a deck.
pub fn validate_deck_fonts<S: AsRef<str>>(all_fonts: &[S], policy: &TypographyPolicy) -> DeckFontResult {
    let mut distinct: Vec<String> = Vec::new();
    for font in all_fonts {
        let family = primary_family(font.as_ref());
        if family.is_empty() {
            continue;
        }
        if !distinct.iter().any(|f| f.eq_ignore_ascii_case(family)) {
            distinct.push(family.to_string());
        }
    }

    let max = policy.max_fonts_per_deck;
    let mut violations = Vec::new();
    if distinct.len() > max {
        violations.push(format!(
            "Deck uses {} distinct fonts (max {}); remove: {}",
            distinct.len(),
            max,
            distinct[max..].join(", ")
        ));
    }

    DeckFontResult {
        valid: violations.is_empty(),
        distinct_fonts: distinct,
        violations,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> TypographyPolicy {
        TypographyPolicy::default()
    }

    #[test]
    fn approved_fonts_pass_case_insensitively() {
        for font in ["Inter", "open sans", "  Lora ", "\"Fira Code\", monospace"] {
            let check = validate_font_choice(font, &policy());
            assert!(check.valid, "{font}: {:?}", check.violations);
        }
    }

    #[test]
    fn unknown_font_gets_category_suggestion() {
        let mono = validate_font_choice("Courier New", &policy());
        assert_eq!(mono.suggestion.as_deref(), Some("Fira Code"));

        let sans = validate_font_choice("Helvetica", &policy());
        assert_eq!(sans.suggestion.as_deref(), Some("Inter"));

        let display = validate_font_choice("Comic Sans MS", &policy());
        assert_eq!(display.suggestion.as_deref(), Some("Abril Fatface"));
        assert_eq!(
            display.violations,
            vec!["Font 'Comic Sans MS' is not in the approved font list (try 'Abril Fatface')"]
        );
    }

    #[test]
    fn empty_font_is_a_violation() {
        let check = validate_font_choice("  ", &policy());
        assert!(!check.valid);
        assert_eq!(check.violations, vec!["No font family given"]);
    }

    #[test]
    fn category_inference() {
        assert_eq!(infer_category("PT Serif"), FontCategory::Serif);
        assert_eq!(infer_category("PT Sans"), FontCategory::Sans);
        assert_eq!(infer_category("Noto Sans Mono"), FontCategory::Mono);
        assert_eq!(infer_category("Brush Script MT"), FontCategory::Display);
        assert_eq!(infer_category("Garamond"), FontCategory::Serif);
    }

    #[test]
    fn pairing_rules() {
        let p = policy();
        assert!(validate_font_pairing("Playfair Display", "Inter", &p).valid);
        assert!(validate_font_pairing("Inter", "Inter", &p).valid);
        assert!(validate_font_pairing("Montserrat", "Open Sans", &p).valid);
        assert!(validate_font_pairing("Fira Code", "JetBrains Mono", &p).valid);

        let both_display = validate_font_pairing("Bebas Neue", "Oswald", &p);
        assert!(!both_display.valid);
        assert!(both_display.reason.unwrap().contains("Two display fonts"));

        assert!(!validate_font_pairing("Inter", "Oswald", &p).valid);
        assert!(!validate_font_pairing("Inter", "Fira Code", &p).valid);

        let serifs = validate_font_pairing("Lora", "Merriweather", &p);
        assert!(!serifs.valid);
        assert_eq!(serifs.violations.len(), 1);
    }

    #[test]
    fn undersized_roles_each_report() {
        let sizes = FontSizes {
            title: Some(20.0),
            body: Some(18.0),
            caption: Some(9.5),
            ..Default::default()
        };
        let check = validate_font_sizes(&sizes, &policy());
        assert!(!check.valid);
        assert_eq!(
            check.violations,
            vec![
                "Title font size 20pt is below the minimum 28pt",
                "Caption font size 9.5pt is below the minimum 12pt",
            ]
        );
    }

    #[test]
    fn nonsense_sizes_are_violations() {
        let sizes = FontSizes {
            body: Some(f64::NAN),
            footnote: Some(-4.0),
            ..Default::default()
        };
        let check = validate_font_sizes(&sizes, &policy());
        assert_eq!(check.violations.len(), 2);
        assert_eq!(check.violations[0], "Invalid body font size: NaN");
    }

    #[test]
    fn deck_font_budget() {
        let ok = validate_deck_fonts(&["Inter", "inter", "Lora", "Inter, sans-serif"], &policy());
        assert!(ok.valid);
        assert_eq!(ok.distinct_fonts, vec!["Inter", "Lora"]);

        let over = validate_deck_fonts(&["Inter", "Lora", "Oswald", "Roboto", "Lato"], &policy());
        assert!(!over.valid);
        assert_eq!(
            over.violations,
            vec!["Deck uses 5 distinct fonts (max 3); remove: Roboto, Lato"]
        );
    }
}
