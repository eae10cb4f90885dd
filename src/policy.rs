//! Design policy: every limit table the validators judge against.
//!
//! [`DesignPolicy::default()`] is the product's fixed policy. Every section
//! is `#[serde(default)]`, so an override file only needs the values it
//! changes:
//!
//! ```
//! use deckguard::policy::DesignPolicy;
//!
//! let policy = DesignPolicy::from_yaml_str("density:\n  default:\n    max_bullets: 4\n").unwrap();
//! assert_eq!(policy.density.default.max_bullets, 4);
//! assert_eq!(policy.palette.min_text_contrast, 4.5);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::DeckguardError;
use crate::model::SlideType;

/// The complete rule set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignPolicy {
    pub palette: PalettePolicy,
    pub typography: TypographyPolicy,
    pub density: DensityPolicy,
    pub layout: LayoutLimits,
}

impl DesignPolicy {
    /// Parses a policy override from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parses a policy override from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a policy file, picking the parser from the extension
    /// (`.yaml`/`.yml` for YAML, anything else JSON).
    pub fn load(path: &Path) -> Result<Self, DeckguardError> {
        let text = fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Self::from_yaml_str(&text).map_err(|source| DeckguardError::PolicyYaml {
                path: path.to_path_buf(),
                source,
            })
        } else {
            Self::from_json_str(&text).map_err(|source| DeckguardError::PolicyJson {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    /// Lists malformed settings. An empty list means the policy is usable.
    pub fn check(&self) -> Vec<String> {
        let mut problems = self.palette.check();

        if self.typography.allowed_fonts.is_empty() {
            problems.push("typography.allowed_fonts must not be empty".to_string());
        }
        if self.typography.max_fonts_per_deck == 0 {
            problems.push("typography.max_fonts_per_deck must be at least 1".to_string());
        }
        for (role, min) in self.typography.size_minimums.roles() {
            if !min.is_finite() || min < 0.0 {
                problems.push(format!(
                    "typography.size_minimums.{role} must be a non-negative number (got {min})"
                ));
            }
        }

        problems.extend(self.density.default.check());
        for (slide_type, limits) in &self.density.overrides {
            problems.extend(
                limits
                    .check()
                    .into_iter()
                    .map(|p| format!("{p} (override for {slide_type:?})")),
            );
        }

        problems.extend(self.layout.check());
        problems
    }
}

/// Contrast and forbidden-color-pair settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PalettePolicy {
    /// Minimum text/background contrast ratio (WCAG AA, normal text).
    pub min_text_contrast: f64,

    /// Maximum CIE76 distance at which a palette color is considered to
    /// be a forbidden pair's reference color.
    pub forbidden_pair_tolerance: f64,

    pub forbidden_pairs: Vec<ForbiddenPair>,
}

impl PalettePolicy {
    /// Problems with `min_text_contrast`.
    pub fn check_contrast(&self) -> Vec<String> {
        let contrast = self.min_text_contrast;
        if !contrast.is_finite() || contrast < 1.0 {
            vec![format!(
                "palette.min_text_contrast must be a number >= 1 (got {contrast})"
            )]
        } else {
            Vec::new()
        }
    }

    /// Problems with the tolerance and the forbidden-pair table.
    pub fn check_pairs(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let tolerance = self.forbidden_pair_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            problems.push(format!(
                "palette.forbidden_pair_tolerance must be a non-negative number (got {tolerance})"
            ));
        }
        for pair in &self.forbidden_pairs {
            for hex in [&pair.first, &pair.second] {
                if let Err(err) = Rgb::from_hex(hex) {
                    problems.push(format!("forbidden pair '{}': {}", pair.name, err));
                }
            }
        }
        problems
    }

    pub fn check(&self) -> Vec<String> {
        let mut problems = self.check_contrast();
        problems.extend(self.check_pairs());
        problems
    }
}

impl Default for PalettePolicy {
    fn default() -> Self {
        Self {
            min_text_contrast: 4.5,
            forbidden_pair_tolerance: 20.0,
            forbidden_pairs: vec![
                ForbiddenPair::new("red/green", "#FF0000", "#00FF00"),
                ForbiddenPair::new("red/dark green", "#FF0000", "#008000"),
                ForbiddenPair::new("yellow/white", "#FFFF00", "#FFFFFF"),
                ForbiddenPair::new("blue/purple", "#0000FF", "#800080"),
                ForbiddenPair::new("green/brown", "#008000", "#8B4513"),
            ],
        }
    }
}

/// Two reference colors that must not appear together in a palette.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenPair {
    pub name: String,
    pub first: String,
    pub second: String,
}

impl ForbiddenPair {
    pub fn new(name: impl Into<String>, first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            first: first.into(),
            second: second.into(),
        }
    }
}

/// Broad font classification used for pairing rules and suggestions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontCategory {
    Serif,
    Sans,
    Mono,
    Display,
}

impl std::fmt::Display for FontCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FontCategory::Serif => "serif",
            FontCategory::Sans => "sans-serif",
            FontCategory::Mono => "monospace",
            FontCategory::Display => "display",
        };
        f.write_str(name)
    }
}

/// An approved font family.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedFont {
    pub family: String,
    pub category: FontCategory,
}

impl AllowedFont {
    pub fn new(family: impl Into<String>, category: FontCategory) -> Self {
        Self {
            family: family.into(),
            category,
        }
    }
}

/// Font allow-list, minimum sizes and the deck font budget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographyPolicy {
    pub allowed_fonts: Vec<AllowedFont>,
    pub size_minimums: FontSizeMinimums,
    pub max_fonts_per_deck: usize,
}

impl Default for TypographyPolicy {
    fn default() -> Self {
        use FontCategory::{Display, Mono, Sans, Serif};

        let fonts = [
            ("Georgia", Serif),
            ("Libre Baskerville", Serif),
            ("Lora", Serif),
            ("Merriweather", Serif),
            ("Playfair Display", Serif),
            ("Source Serif Pro", Serif),
            ("Inter", Sans),
            ("Lato", Sans),
            ("Montserrat", Sans),
            ("Nunito", Sans),
            ("Open Sans", Sans),
            ("Poppins", Sans),
            ("Roboto", Sans),
            ("Source Sans Pro", Sans),
            ("Work Sans", Sans),
            ("Fira Code", Mono),
            ("IBM Plex Mono", Mono),
            ("JetBrains Mono", Mono),
            ("Source Code Pro", Mono),
            ("Abril Fatface", Display),
            ("Bebas Neue", Display),
            ("Oswald", Display),
        ];

        Self {
            allowed_fonts: fonts
                .into_iter()
                .map(|(family, category)| AllowedFont::new(family, category))
                .collect(),
            size_minimums: FontSizeMinimums::default(),
            max_fonts_per_deck: 3,
        }
    }
}

/// Minimum point size per text role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizeMinimums {
    pub title: f64,
    pub subtitle: f64,
    pub heading: f64,
    pub body: f64,
    pub caption: f64,
    pub footnote: f64,
}

impl FontSizeMinimums {
    pub fn roles(&self) -> [(&'static str, f64); 6] {
        [
            ("title", self.title),
            ("subtitle", self.subtitle),
            ("heading", self.heading),
            ("body", self.body),
            ("caption", self.caption),
            ("footnote", self.footnote),
        ]
    }
}

impl Default for FontSizeMinimums {
    fn default() -> Self {
        Self {
            title: 28.0,
            subtitle: 20.0,
            heading: 24.0,
            body: 16.0,
            caption: 12.0,
            footnote: 10.0,
        }
    }
}

/// Content limits for one slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityLimits {
    /// Bullet and numbered items combined.
    pub max_bullets: usize,
    pub max_words: usize,
    /// Data rows per table (header and separator rows excluded).
    pub max_table_rows: usize,
}

impl DensityLimits {
    pub fn check(&self) -> Vec<String> {
        [
            ("max_bullets", self.max_bullets),
            ("max_words", self.max_words),
            ("max_table_rows", self.max_table_rows),
        ]
        .into_iter()
        .filter(|(_, value)| *value == 0)
        .map(|(name, _)| format!("Invalid density limit: {name} must be at least 1"))
        .collect()
    }
}

impl Default for DensityLimits {
    fn default() -> Self {
        Self {
            max_bullets: 6,
            max_words: 90,
            max_table_rows: 6,
        }
    }
}

/// Density limits with optional per-layout overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityPolicy {
    pub default: DensityLimits,
    pub overrides: BTreeMap<SlideType, DensityLimits>,
}

impl DensityPolicy {
    /// A policy applying the same limits to every slide type.
    pub fn uniform(limits: DensityLimits) -> Self {
        Self {
            default: limits,
            overrides: BTreeMap::new(),
        }
    }

    /// Limits for a slide type, falling back to the default.
    pub fn limits_for(&self, slide_type: SlideType) -> DensityLimits {
        self.overrides
            .get(&slide_type)
            .copied()
            .unwrap_or(self.default)
    }
}

/// Layout complexity limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutLimits {
    pub max_columns: i64,
    /// Distinct font sizes on one slide.
    pub max_font_sizes: usize,
    /// Distinct non-neutral colors on one slide.
    pub max_colors: usize,
    /// Minimum scrim opacity when text sits on a full-bleed image.
    pub min_overlay_opacity: f64,
}

impl LayoutLimits {
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.max_columns < 1 {
            problems.push(format!(
                "layout.max_columns must be at least 1 (got {})",
                self.max_columns
            ));
        }
        if self.max_font_sizes == 0 {
            problems.push("layout.max_font_sizes must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.min_overlay_opacity) {
            problems.push(format!(
                "layout.min_overlay_opacity must be within 0..1 (got {})",
                self.min_overlay_opacity
            ));
        }
        problems
    }
}

impl Default for LayoutLimits {
    fn default() -> Self {
        Self {
            max_columns: 3,
            max_font_sizes: 4,
            max_colors: 5,
            min_overlay_opacity: 0.4,
        }
    }
}
