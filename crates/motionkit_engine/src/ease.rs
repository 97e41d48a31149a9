//! Easing curves.
//!
//! Curves map the normalized progress of a tween to the position
//! handed to the interpolation. They are not clamped, so a curve like
//! [`back_out`] overshoots and the interpolated value extrapolates past
//! its endpoint.

/// Easing function on a [`f64`] time.
pub type EaseFn = fn(t: f64) -> f64;

#[inline]
pub fn linear(t: f64) -> f64 {
    t
}

#[inline]
pub fn quad_in(t: f64) -> f64 {
    t * t
}

#[inline]
pub fn quad_out(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

#[inline]
pub fn quad_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[inline]
pub fn cubic_in(t: f64) -> f64 {
    t * t * t
}

#[inline]
pub fn cubic_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[inline]
pub fn cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Overshoots the target slightly before settling.
#[inline]
pub fn back_out(t: f64) -> f64 {
    const C1: f64 = 1.70158;
    const C3: f64 = C1 + 1.0;

    1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
}
