use deckguard::autofix::best_text_color;
use deckguard::color::{contrast_ratio, delta_e, hex_to_hsl, hsl_to_hex, normalize_hex, Rgb};
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn contrast_is_symmetric_and_bounded(a in proptest_helpers::arb_hex(), b in proptest_helpers::arb_hex()) {
        let ab = contrast_ratio(&a, &b).expect("valid hex");
        let ba = contrast_ratio(&b, &a).expect("valid hex");

        prop_assert!((ab - ba).abs() < 1e-12);
        prop_assert!(ab >= 1.0 - 1e-12);
        prop_assert!(ab <= 21.0 + 1e-9);
    }

    #[test]
    fn delta_e_is_symmetric_with_zero_identity(a in proptest_helpers::arb_hex(), b in proptest_helpers::arb_hex()) {
        prop_assert_eq!(delta_e(&a, &a).expect("valid hex"), 0.0);

        let ab = delta_e(&a, &b).expect("valid hex");
        let ba = delta_e(&b, &a).expect("valid hex");
        prop_assert!((ab - ba).abs() < 1e-9);
        prop_assert!(ab >= 0.0);
    }

    #[test]
    fn hsl_round_trip_within_one(rgb in proptest_helpers::arb_rgb()) {
        let back = Rgb::from_hex(&hsl_to_hex(hex_to_hsl(&rgb.to_hex()).expect("valid hex")))
            .expect("formatted hex parses");

        for (x, y) in [(rgb.r, back.r), (rgb.g, back.g), (rgb.b, back.b)] {
            prop_assert!(x.abs_diff(y) <= 1, "{} -> {}", rgb, back);
        }
    }

    #[test]
    fn normalized_hex_is_canonical(hex in proptest_helpers::arb_hex()) {
        let once = normalize_hex(&hex).expect("valid hex");
        prop_assert_eq!(normalize_hex(&once).expect("normalized hex parses"), once.clone());
        prop_assert_eq!(once.len(), 7);
        prop_assert!(once.starts_with('#'));
        prop_assert_eq!(once.to_uppercase(), once);
    }

    #[test]
    fn black_or_white_always_reaches_aa(background in proptest_helpers::arb_rgb()) {
        let (text, ratio) = best_text_color(background);

        prop_assert!(text == Rgb::BLACK || text == Rgb::WHITE);
        prop_assert!(ratio >= 4.5, "{} on {}: {}", text, background, ratio);
        prop_assert!(ratio >= Rgb::BLACK.contrast_ratio(background));
        prop_assert!(ratio >= Rgb::WHITE.contrast_ratio(background));
    }
}
