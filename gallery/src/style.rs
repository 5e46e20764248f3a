//! Caption styling shared by tiles, the style popover, and broadcast.
//!
//! `TextStyle` is the per-tile record. Its `shadow` is derived from the
//! background color and has no setter of its own: the only way to change it
//! is `set_background_color`. `BroadcastStyle` is the fixed record copied from
//! one tile onto every other tile; it is validated before it is applied.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use serde::{Deserialize, Serialize};

/// Default caption text color.
pub const DEFAULT_COLOR: &str = "#000000";
/// Default caption background color.
pub const DEFAULT_BACKGROUND: &str = "#f9fafb";
/// Shadow used until the background color is first changed.
pub const DEFAULT_SHADOW: &str = "0 2px 4px rgba(0,0,0,0.05)";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("{field} must not be empty")]
    EmptyColor { field: &'static str },
    #[error("shadow does not match background color {background}")]
    ShadowMismatch { background: String },
    #[error("no broadcast target is configured for this canvas")]
    BroadcastUnavailable,
}

/// Horizontal caption alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// CSS `text-align` value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Drop shadow derived from a caption background color.
#[must_use]
pub fn derive_shadow(background: &str) -> String {
    format!("0 4px 8px {background}")
}

/// Caption style for a single tile.
///
/// Deserialized records have their shadow re-derived from the background,
/// so a stored shadow can never drift from its color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TextStyleRecord")]
pub struct TextStyle {
    pub is_bold: bool,
    pub color: String,
    background_color: String,
    pub text_align: TextAlign,
    shadow: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            is_bold: false,
            color: DEFAULT_COLOR.to_owned(),
            background_color: DEFAULT_BACKGROUND.to_owned(),
            text_align: TextAlign::Left,
            shadow: DEFAULT_SHADOW.to_owned(),
        }
    }
}

/// Loose wire form of `TextStyle`; every field may be missing.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextStyleRecord {
    #[serde(default)]
    is_bold: bool,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    text_align: TextAlign,
    #[serde(default)]
    shadow: Option<String>,
}

impl From<TextStyleRecord> for TextStyle {
    fn from(raw: TextStyleRecord) -> Self {
        let mut style = TextStyle {
            is_bold: raw.is_bold,
            text_align: raw.text_align,
            ..TextStyle::default()
        };
        if let Some(color) = raw.color.filter(|c| !c.trim().is_empty()) {
            style.color = color;
        }
        match raw.background_color.filter(|c| !c.trim().is_empty()) {
            Some(bg) if bg == DEFAULT_BACKGROUND && raw.shadow.as_deref().is_none_or(|s| s == DEFAULT_SHADOW) => {}
            Some(bg) => style.set_background_color(bg),
            None => {}
        }
        style
    }
}

impl TextStyle {
    #[must_use]
    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    #[must_use]
    pub fn shadow(&self) -> &str {
        &self.shadow
    }

    pub fn toggle_bold(&mut self) {
        self.is_bold = !self.is_bold;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    /// Replace the background color and recompute the derived shadow.
    pub fn set_background_color(&mut self, background: impl Into<String>) {
        self.background_color = background.into();
        self.shadow = derive_shadow(&self.background_color);
    }

    /// Package the current style for broadcast.
    #[must_use]
    pub fn broadcast(&self) -> BroadcastStyle {
        BroadcastStyle {
            is_bold: self.is_bold,
            color: self.color.clone(),
            background_color: self.background_color.clone(),
            text_align: self.text_align,
            shadow: self.shadow.clone(),
        }
    }

    /// Overwrite every field with a broadcast record.
    pub fn apply(&mut self, style: &BroadcastStyle) {
        self.is_bold = style.is_bold;
        self.color.clone_from(&style.color);
        self.background_color.clone_from(&style.background_color);
        self.text_align = style.text_align;
        self.shadow.clone_from(&style.shadow);
    }
}

/// The style subset copied onto every tile by a broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastStyle {
    pub is_bold: bool,
    pub color: String,
    pub background_color: String,
    pub text_align: TextAlign,
    pub shadow: String,
}

impl BroadcastStyle {
    /// Check the record before it is fanned out.
    ///
    /// The shadow must be the default shadow paired with the default
    /// background, or the shadow derived from the record's background.
    ///
    /// # Errors
    ///
    /// Returns `StyleError::EmptyColor` for a blank color and
    /// `StyleError::ShadowMismatch` when the shadow was not derived from the
    /// background.
    pub fn validate(&self) -> Result<(), StyleError> {
        if self.color.trim().is_empty() {
            return Err(StyleError::EmptyColor { field: "color" });
        }
        if self.background_color.trim().is_empty() {
            return Err(StyleError::EmptyColor { field: "backgroundColor" });
        }
        let untouched = self.background_color == DEFAULT_BACKGROUND && self.shadow == DEFAULT_SHADOW;
        if !untouched && self.shadow != derive_shadow(&self.background_color) {
            return Err(StyleError::ShadowMismatch { background: self.background_color.clone() });
        }
        Ok(())
    }
}
