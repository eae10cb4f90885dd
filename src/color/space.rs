//! HSL and CIE Lab color spaces.

use serde::Serialize;

use super::rgb::{ColorError, Rgb};

/// A color in HSL space.
///
/// `h` is in degrees (`0.0..360.0`), `s` and `l` are percentages
/// (`0.0..=100.0`). Values are kept unrounded so that converting back to
/// RGB lands on the original channels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// A color in CIE L*a*b* space (D65 white point).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

// D65 reference white
const WHITE_X: f64 = 0.950_47;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.088_83;

impl Rgb {
    /// Converts to HSL.
    pub fn to_hsl(self) -> Hsl {
        let [r, g, b] = self.unit_channels();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;

        if delta == 0.0 {
            return Hsl {
                h: 0.0,
                s: 0.0,
                l: l * 100.0,
            };
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        Hsl {
            h: h.rem_euclid(360.0),
            s: s * 100.0,
            l: l * 100.0,
        }
    }

    /// Converts to CIE Lab through linear RGB and XYZ.
    ///
    /// Linearization here uses the IEC 61966-2-1 threshold (0.04045); the
    /// WCAG luminance path keeps its own 0.03928 constant.
    pub fn to_lab(self) -> Lab {
        let [r, g, b] = self.unit_channels().map(srgb_to_linear);

        let x = r * 0.412_456_4 + g * 0.357_576_1 + b * 0.180_437_5;
        let y = r * 0.212_672_9 + g * 0.715_152_2 + b * 0.072_175_0;
        let z = r * 0.019_333_9 + g * 0.119_192_0 + b * 0.950_304_1;

        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y / WHITE_Y);
        let fz = lab_f(z / WHITE_Z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Whether the color reads as a neutral (grey, near-black or
    /// near-white) rather than a hue.
    pub fn is_neutral(self) -> bool {
        let hsl = self.to_hsl();
        hsl.s < 10.0 || hsl.l < 8.0 || hsl.l > 95.0
    }
}

impl Hsl {
    /// Converts back to RGB, rounding each channel to the nearest integer.
    ///
    /// Out-of-range inputs are wrapped (hue) or clamped (saturation and
    /// lightness) rather than rejected.
    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(360.0);
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match (h / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb::new(to_channel(r + m), to_channel(g + m), to_channel(b + m))
    }
}

/// Parses a hex string and converts it to HSL.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorError> {
    Rgb::from_hex(hex).map(Rgb::to_hsl)
}

/// Converts HSL to an uppercase `#RRGGBB` string.
pub fn hsl_to_hex(hsl: Hsl) -> String {
    hsl.to_rgb().to_hex()
}

/// Converts an sRGB color to CIE Lab.
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    rgb.to_lab()
}

#[inline]
fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

#[inline]
fn to_channel(v: f64) -> u8 {
    // `as` saturates and maps NaN to 0
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn primary_colors_to_hsl() {
        let red = Rgb::new(255, 0, 0).to_hsl();
        assert!(close(red.h, 0.0, 1e-9) && close(red.s, 100.0, 1e-9) && close(red.l, 50.0, 1e-9));

        let green = hex_to_hsl("#00FF00").unwrap();
        assert!(close(green.h, 120.0, 1e-9));

        let blue = hex_to_hsl("#0000FF").unwrap();
        assert!(close(blue.h, 240.0, 1e-9));
    }

    #[test]
    fn greys_have_no_saturation() {
        let grey = hex_to_hsl("#808080").unwrap();
        assert_eq!(grey.s, 0.0);
        assert_eq!(grey.h, 0.0);
        assert!(close(grey.l, 50.196, 1e-3));
    }

    #[test]
    fn hsl_to_hex_known_values() {
        assert_eq!(hsl_to_hex(Hsl { h: 0.0, s: 100.0, l: 50.0 }), "#FF0000");
        assert_eq!(hsl_to_hex(Hsl { h: 120.0, s: 100.0, l: 25.0 }), "#008000");
        assert_eq!(hsl_to_hex(Hsl { h: 0.0, s: 0.0, l: 100.0 }), "#FFFFFF");
        // hue wraps
        assert_eq!(hsl_to_hex(Hsl { h: 360.0, s: 100.0, l: 50.0 }), "#FF0000");
    }

    #[test]
    fn hsl_roundtrip_for_sample_colors() {
        for hex in ["#1E90FF", "#FF6347", "#2E8B57", "#777777", "#C71585", "#0D0D0D"] {
            assert_eq!(hsl_to_hex(hex_to_hsl(hex).unwrap()), hex);
        }
    }

    #[test]
    fn lab_reference_values() {
        let white = Rgb::WHITE.to_lab();
        assert!(close(white.l, 100.0, 0.01));
        assert!(close(white.a, 0.0, 0.01));
        assert!(close(white.b, 0.0, 0.01));

        let black = rgb_to_lab(Rgb::BLACK);
        assert!(close(black.l, 0.0, 1e-9));

        let red = Rgb::new(255, 0, 0).to_lab();
        assert!(close(red.l, 53.24, 0.05));
        assert!(close(red.a, 80.09, 0.05));
        assert!(close(red.b, 67.20, 0.05));
    }

    #[test]
    fn neutral_detection() {
        assert!(Rgb::new(0x80, 0x80, 0x80).is_neutral());
        assert!(Rgb::BLACK.is_neutral());
        assert!(Rgb::new(0xFA, 0xFA, 0xF5).is_neutral());
        assert!(!Rgb::new(0x1E, 0x90, 0xFF).is_neutral());
        assert!(!Rgb::new(0xFF, 0x00, 0x00).is_neutral());
    }
}
