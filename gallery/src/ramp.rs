//! Color ramps: map a slider position onto a fixed gradient.
//!
//! Both ramps pin the outer 5% of the track to their anchors (black on the
//! left, white on the right) and sweep the hue wheel across the remaining
//! 90%. The mapping is pure and deterministic; the popover calls it on every
//! pointer tick of a slider drag.

#[cfg(test)]
#[path = "ramp_test.rs"]
mod ramp_test;

use std::fmt;

use crate::consts::RAMP_PIN_ZONE;

const FOREGROUND_STOPS: &[&str] = &[
    "black", "red", "orange", "yellow", "lime", "cyan", "blue", "violet", "magenta", "white",
];

const BACKGROUND_STOPS: &[&str] = &[
    "black", "#fce4ec", "#f3e5f5", "#e8eaf6", "#e3f2fd", "#e0f7fa", "#e0f2f1", "#e8f5e9", "#f1f8e9", "#f9fbe7",
    "#fffde7", "#fff8e1", "#fff3e0", "#fbe9e7", "#ffebee", "white",
];

/// A CSS color produced by a ramp.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// A named or literal CSS color (anchors).
    Named(&'static str),
    /// An HSL color; saturation and lightness are percentages.
    Hsl { hue: f64, saturation: u8, lightness: u8 },
}

impl Color {
    /// Hue in degrees, or `None` for anchor colors.
    #[must_use]
    pub fn hue(&self) -> Option<f64> {
        match self {
            Self::Named(_) => None,
            Self::Hsl { hue, .. } => Some(*hue),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Hsl { hue, saturation, lightness } => {
                write!(f, "hsl({}, {saturation}%, {lightness}%)", format_hue(*hue))
            }
        }
    }
}

/// Render a hue with at most two decimals, dropping trailing zeros.
fn format_hue(hue: f64) -> String {
    let fixed = format!("{hue:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" { "0".to_owned() } else { trimmed.to_owned() }
}

/// The two gradient definitions offered by the style popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ramp {
    /// Fully saturated hues for caption text.
    Foreground,
    /// Pale pastel hues for the caption background.
    Background,
}

impl Ramp {
    /// Color pinned to the left end of the track.
    #[must_use]
    pub fn first_anchor(self) -> Color {
        Color::Named("black")
    }

    /// Color pinned to the right end of the track.
    #[must_use]
    pub fn last_anchor(self) -> Color {
        Color::Named("white")
    }

    fn saturation_lightness(self) -> (u8, u8) {
        match self {
            Self::Foreground => (100, 50),
            Self::Background => (70, 90),
        }
    }

    /// Map a track ratio in `[0, 1]` to a color.
    ///
    /// Values outside the range behave like the nearest end; non-finite input
    /// is treated as `0`.
    #[must_use]
    pub fn map(self, ratio: f64) -> Color {
        let ratio = if ratio.is_finite() { ratio } else { 0.0 };
        if ratio < RAMP_PIN_ZONE {
            return self.first_anchor();
        }
        if ratio > 1.0 - RAMP_PIN_ZONE {
            return self.last_anchor();
        }
        let normalized = (ratio - RAMP_PIN_ZONE) / (1.0 - 2.0 * RAMP_PIN_ZONE);
        let (saturation, lightness) = self.saturation_lightness();
        Color::Hsl { hue: normalized * 360.0, saturation, lightness }
    }

    /// Map a pointer offset within a track of `width` pixels to a color.
    #[must_use]
    pub fn map_offset(self, px: f64, width: f64) -> Color {
        self.map(ratio_from_offset(px, width))
    }

    /// CSS gradient painted on the slider track.
    #[must_use]
    pub fn gradient_css(self) -> String {
        let stops = match self {
            Self::Foreground => FOREGROUND_STOPS,
            Self::Background => BACKGROUND_STOPS,
        };
        format!("linear-gradient(to right, {})", stops.join(", "))
    }
}

/// Convert a pointer offset into a ratio of the track width.
///
/// The offset is clamped to `[0, width]`. A degenerate track yields `0`.
#[must_use]
pub fn ratio_from_offset(px: f64, width: f64) -> f64 {
    if !width.is_finite() || width <= 0.0 || !px.is_finite() {
        return 0.0;
    }
    px.clamp(0.0, width) / width
}
