//! Color science for design validation.
//!
//! Everything here is pure math over [`Rgb`] values:
//!
//! - hex parsing/formatting (normalized to uppercase `#RRGGBB`)
//! - HSL and CIE Lab conversions
//! - CIE76 perceptual distance ([`delta_e`])
//! - WCAG relative luminance and contrast ratio
//!
//! The `Rgb` methods are total. The string entry points return
//! [`ColorError`] for malformed input; validators turn that into a
//! violation instead of failing.
//!
//! # Example
//!
//! ```
//! use deckguard::color::{hex_to_hsl, hsl_to_hex, Rgb};
//!
//! let teal = Rgb::from_hex("#008080").unwrap();
//! assert!(teal.contrast_ratio(Rgb::WHITE) > 4.5);
//! assert_eq!(hsl_to_hex(hex_to_hsl("#008080").unwrap()), "#008080");
//! ```

mod contrast;
mod rgb;
mod space;

pub use contrast::{contrast_ratio, delta_e, luminance, round2};
pub use rgb::{hex_to_rgb, normalize_hex, rgb_to_hex, ColorError, Rgb};
pub use space::{hex_to_hsl, hsl_to_hex, rgb_to_lab, Hsl, Lab};
