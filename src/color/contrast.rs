//! WCAG luminance/contrast and perceptual distance.

use super::rgb::{ColorError, Rgb};

impl Rgb {
    /// WCAG 2.x relative luminance in `0.0..=1.0`.
    pub fn relative_luminance(self) -> f64 {
        let [r, g, b] = self.unit_channels().map(wcag_linearize);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// WCAG contrast ratio against `other`, in `1.0..=21.0`.
    ///
    /// The ratio is symmetric in its arguments.
    pub fn contrast_ratio(self, other: Rgb) -> f64 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// CIE76 color difference: Euclidean distance in Lab space.
    pub fn delta_e(self, other: Rgb) -> f64 {
        let a = self.to_lab();
        let b = other.to_lab();
        ((a.l - b.l).powi(2) + (a.a - b.a).powi(2) + (a.b - b.b).powi(2)).sqrt()
    }
}

#[inline]
fn wcag_linearize(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of a hex color.
pub fn luminance(hex: &str) -> Result<f64, ColorError> {
    Ok(Rgb::from_hex(hex)?.relative_luminance())
}

/// Contrast ratio between two hex colors.
///
/// # Examples
///
/// ```
/// use deckguard::color::contrast_ratio;
///
/// let ratio = contrast_ratio("#000000", "#FFFFFF").unwrap();
/// assert!((ratio - 21.0).abs() < 1e-9);
/// ```
pub fn contrast_ratio(fg: &str, bg: &str) -> Result<f64, ColorError> {
    Ok(Rgb::from_hex(fg)?.contrast_ratio(Rgb::from_hex(bg)?))
}

/// CIE76 distance between two hex colors.
pub fn delta_e(a: &str, b: &str) -> Result<f64, ColorError> {
    Ok(Rgb::from_hex(a)?.delta_e(Rgb::from_hex(b)?))
}

/// Rounds to two decimals for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
