#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_TILE_HEIGHT, MIN_TILE_WIDTH};

/// A point or offset in canvas-local CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// Tile dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp to the minimum tile size. Non-finite components fall back to the minimum.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            width: clamp_dimension(self.width, MIN_TILE_WIDTH),
            height: clamp_dimension(self.height, MIN_TILE_HEIGHT),
        }
    }

    /// Grow or shrink by `delta`, clamping to the minimum tile size.
    #[must_use]
    pub fn resized_by(self, delta: Point) -> Self {
        Self::new(self.width + delta.x, self.height + delta.y).clamped()
    }
}

fn clamp_dimension(value: f64, min: f64) -> f64 {
    if value.is_finite() { value.max(min) } else { min }
}

/// Axis-aligned rectangle used for hit-testing tile parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { origin: Point::new(x, y), size: Size::new(width, height) }
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.origin.x
            && pt.x <= self.origin.x + self.size.width
            && pt.y >= self.origin.y
            && pt.y <= self.origin.y + self.size.height
    }
}
