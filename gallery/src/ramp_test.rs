#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn hue_of(color: &Color) -> f64 {
    color.hue().unwrap_or(f64::NAN)
}

// =============================================================
// ratio_from_offset
// =============================================================

#[test]
fn ratio_from_offset_divides_by_width() {
    assert_eq!(ratio_from_offset(50.0, 200.0), 0.25);
}

#[test]
fn ratio_from_offset_clamps_outside_track() {
    assert_eq!(ratio_from_offset(-30.0, 200.0), 0.0);
    assert_eq!(ratio_from_offset(260.0, 200.0), 1.0);
}

#[test]
fn ratio_from_offset_degenerate_track_is_zero() {
    assert_eq!(ratio_from_offset(10.0, 0.0), 0.0);
    assert_eq!(ratio_from_offset(10.0, -5.0), 0.0);
    assert_eq!(ratio_from_offset(f64::NAN, 100.0), 0.0);
}

// =============================================================
// Pinned zones
// =============================================================

#[test]
fn low_ratios_pin_to_black() {
    for ramp in [Ramp::Foreground, Ramp::Background] {
        for r in [0.0, 0.01, 0.025, 0.0499] {
            assert_eq!(ramp.map(r), Color::Named("black"), "{ramp:?} at {r}");
        }
    }
}

#[test]
fn high_ratios_pin_to_white() {
    for ramp in [Ramp::Foreground, Ramp::Background] {
        for r in [0.9501, 0.97, 1.0] {
            assert_eq!(ramp.map(r), Color::Named("white"), "{ramp:?} at {r}");
        }
    }
}

#[test]
fn out_of_range_ratios_behave_like_ends() {
    assert_eq!(Ramp::Foreground.map(-3.0), Color::Named("black"));
    assert_eq!(Ramp::Foreground.map(7.0), Color::Named("white"));
    assert_eq!(Ramp::Foreground.map(f64::NAN), Color::Named("black"));
}

// =============================================================
// Hue sweep
// =============================================================

#[test]
fn midpoint_is_cyan_hue_on_foreground() {
    let c = Ramp::Foreground.map(0.5);
    assert!((hue_of(&c) - 180.0).abs() < EPSILON);
    assert_eq!(c.to_string(), "hsl(180, 100%, 50%)");
}

#[test]
fn background_ramp_uses_pastel_saturation_and_lightness() {
    let c = Ramp::Background.map(0.5);
    assert_eq!(c.to_string(), "hsl(180, 70%, 90%)");
}

#[test]
fn hue_is_continuous_at_pin_boundaries() {
    let lo = Ramp::Foreground.map(0.05);
    let just_above = Ramp::Foreground.map(0.05 + 1e-7);
    assert!(hue_of(&lo).abs() < EPSILON);
    assert!((hue_of(&just_above) - hue_of(&lo)).abs() < 1e-3);

    let hi = Ramp::Foreground.map(0.95);
    let just_below = Ramp::Foreground.map(0.95 - 1e-7);
    assert!((hue_of(&hi) - 360.0).abs() < 1e-6);
    assert!((hue_of(&just_below) - hue_of(&hi)).abs() < 1e-3);
}

#[test]
fn hue_increases_monotonically_across_band() {
    let mut last = -1.0;
    for i in 0..=90 {
        let r = 0.05 + f64::from(i) * 0.01;
        let h = hue_of(&Ramp::Background.map(r.min(0.95)));
        assert!(h >= last, "hue dropped at ratio {r}");
        last = h;
    }
}

#[test]
fn map_is_deterministic() {
    for r in [0.1, 0.33, 0.5, 0.77] {
        assert_eq!(Ramp::Foreground.map(r), Ramp::Foreground.map(r));
    }
}

// =============================================================
// Slider scenario
// =============================================================

#[test]
fn slider_of_200px_pins_and_sweeps() {
    assert_eq!(Ramp::Foreground.map_offset(5.0, 200.0), Color::Named("black"));
    let mid = Ramp::Foreground.map_offset(100.0, 200.0);
    assert!((hue_of(&mid) - 180.0).abs() < EPSILON);
    assert_eq!(Ramp::Foreground.map_offset(199.0, 200.0), Color::Named("white"));
}

// =============================================================
// Display
// =============================================================

#[test]
fn display_trims_hue_decimals() {
    let c = Color::Hsl { hue: 123.456_789, saturation: 100, lightness: 50 };
    assert_eq!(c.to_string(), "hsl(123.46, 100%, 50%)");
    let c = Color::Hsl { hue: 90.5, saturation: 70, lightness: 90 };
    assert_eq!(c.to_string(), "hsl(90.5, 70%, 90%)");
}

#[test]
fn display_named_is_verbatim() {
    assert_eq!(Color::Named("white").to_string(), "white");
}

#[test]
fn gradients_start_black_and_end_white() {
    for ramp in [Ramp::Foreground, Ramp::Background] {
        let css = ramp.gradient_css();
        assert!(css.starts_with("linear-gradient(to right, black, "));
        assert!(css.ends_with(", white)"));
    }
    assert!(Ramp::Background.gradient_css().contains("#fce4ec"));
    assert!(Ramp::Foreground.gradient_css().contains("magenta"));
}
