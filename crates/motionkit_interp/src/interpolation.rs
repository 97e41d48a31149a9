use bevy_math::{DMat4, DVec2, DVec3};

use crate::geometry::{Rect, Size};

/// Trait for interpolating between 2 values based on a f64 `t` value.
///
/// `t` is never clamped: values outside `[0, 1]` extrapolate along
/// the same line, which lets overshooting curves push past either
/// endpoint.
pub trait Interpolation<T = Self, U = Self> {
    /// Blend `a` towards `b` by `t`.
    fn interp(a: &Self, b: &T, t: f64) -> U;
}

#[macro_export]
macro_rules! impl_float_interpolation {
    ($ty:ty, $base:ty) => {
        impl $crate::interpolation::Interpolation for $ty {
            #[inline]
            fn interp(a: &Self, b: &Self, t: f64) -> Self {
                let t = t as $base;
                *a + (*b - *a) * t
            }
        }
    };
}

macro_rules! impl_step_interpolation {
    ($ty: ty) => {
        impl $crate::interpolation::Interpolation for $ty {
            #[inline]
            fn interp(a: &Self, b: &Self, t: f64) -> Self {
                $crate::interpolation::step(*a, *b, t)
            }
        }
    };
}

impl_step_interpolation!(bool);

impl_float_interpolation!(f32, f32);
impl_float_interpolation!(f64, f64);
impl_float_interpolation!(DVec2, f64);
impl_float_interpolation!(DVec3, f64);

impl Interpolation for Size {
    #[inline]
    fn interp(a: &Self, b: &Self, t: f64) -> Self {
        Size::new(
            f64::interp(&a.width, &b.width, t),
            f64::interp(&a.height, &b.height, t),
        )
    }
}

impl Interpolation for Rect {
    #[inline]
    fn interp(a: &Self, b: &Self, t: f64) -> Self {
        Rect {
            origin: Interpolation::interp(&a.origin, &b.origin, t),
            size: Interpolation::interp(&a.size, &b.size, t),
        }
    }
}

impl Interpolation for DMat4 {
    /// Decomposes both matrices and blends translation, scale and
    /// rotation separately. See [`crate::transform::interpolate`].
    #[inline]
    fn interp(a: &Self, b: &Self, t: f64) -> Self {
        crate::transform::interpolate(a, b, t)
    }
}

#[cfg(feature = "color")]
pub mod color {
    use bevy_color::prelude::*;

    use super::Interpolation;

    impl Interpolation for Srgba {
        #[inline]
        fn interp(a: &Self, b: &Self, t: f64) -> Self {
            Srgba::new(
                f32::interp(&a.red, &b.red, t),
                f32::interp(&a.green, &b.green, t),
                f32::interp(&a.blue, &b.blue, t),
                f32::interp(&a.alpha, &b.alpha, t),
            )
        }
    }

    impl Interpolation for Color {
        /// Blends the four sRGB channels independently, whatever
        /// color space the endpoints were authored in.
        #[inline]
        fn interp(a: &Self, b: &Self, t: f64) -> Self {
            Color::Srgba(Srgba::interp(
                &a.to_srgba(),
                &b.to_srgba(),
                t,
            ))
        }
    }
}

/// Steps between two different discrete values of any type.
/// Returns `b` if `t > 0.5`, otherwise returns `a` (ties go to `a`).
#[inline]
pub fn step<T>(a: T, b: T, t: f64) -> T {
    if t > 0.5 {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_endpoints() {
        assert_eq!(f64::interp(&2.0, &6.0, 0.0), 2.0);
        assert_eq!(f64::interp(&2.0, &6.0, 1.0), 6.0);
        assert_eq!(f64::interp(&2.0, &6.0, 0.25), 3.0);
    }

    #[test]
    fn scalar_extrapolates_outside_unit_range() {
        assert_eq!(f64::interp(&0.0, &10.0, 1.5), 15.0);
        assert_eq!(f64::interp(&0.0, &10.0, -0.5), -5.0);
        assert_eq!(f32::interp(&0.0, &4.0, 2.0), 8.0);
    }

    #[test]
    fn bool_steps_after_half() {
        assert!(!bool::interp(&false, &true, 0.0));
        assert!(!bool::interp(&false, &true, 0.5));
        assert!(bool::interp(&false, &true, 0.500_001));
        assert!(bool::interp(&false, &true, 1.0));
    }

    #[test]
    fn point_is_component_wise() {
        let p = DVec2::interp(
            &DVec2::new(0.0, 0.0),
            &DVec2::new(10.0, 20.0),
            0.25,
        );
        assert_eq!(p, DVec2::new(2.5, 5.0));
    }

    #[test]
    fn rect_blends_origin_and_size() {
        let a = Rect::new(DVec2::ZERO, Size::new(10.0, 10.0));
        let b = Rect::new(DVec2::new(4.0, 8.0), Size::new(20.0, 30.0));

        let r = Rect::interp(&a, &b, 0.5);
        assert_eq!(r.origin, DVec2::new(2.0, 4.0));
        assert_eq!(r.size, Size::new(15.0, 20.0));
    }

    #[cfg(feature = "color")]
    #[test]
    fn color_blends_channels() {
        use bevy_color::prelude::*;

        let a = Color::srgba(0.0, 0.0, 0.0, 0.0);
        let b = Color::srgba(1.0, 0.5, 0.25, 1.0);

        let c = Color::interp(&a, &b, 0.5).to_srgba();
        assert_eq!(c, Srgba::new(0.5, 0.25, 0.125, 0.5));

        assert_eq!(Color::interp(&a, &b, 0.0).to_srgba(), a.to_srgba());
        assert_eq!(Color::interp(&a, &b, 1.0).to_srgba(), b.to_srgba());
    }
}
