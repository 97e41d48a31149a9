//! Plain 2D value types that have no direct glam counterpart.
//!
//! Points are represented with [`DVec2`].

use bevy_math::DVec2;

/// A 2D extent.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle described by its origin and size.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: DVec2,
    pub size: Size,
}

impl Rect {
    #[inline]
    pub const fn new(origin: DVec2, size: Size) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(DVec2::new(x, y), Size::new(width, height))
    }
}
