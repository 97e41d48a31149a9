//! A boxed, shape-tagged value that can be interpolated without the
//! caller knowing its concrete type.

use alloc::sync::Arc;
use core::any::{type_name, Any};
use core::fmt::{self, Debug};

use bevy_math::{DMat4, DVec2};
#[cfg(feature = "color")]
use bevy_color::Color;

use crate::error::InterpolationError;
use crate::geometry::{Rect, Size};
use crate::interpolation::Interpolation;

/// Identifies which interpolation rule applies to a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Bool,
    Scalar,
    Point,
    Size,
    Rect,
    Color,
    Transform3D,
    Unsupported,
}

/// An interpolation endpoint.
///
/// Numbers keep their original representation so that two endpoints
/// stored differently can still be blended: see
/// [`Value::try_interpolate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f32),
    Double(f64),
    Point(DVec2),
    Size(Size),
    Rect(Rect),
    #[cfg(feature = "color")]
    Color(Color),
    Transform3D(DMat4),
    /// Any other payload. Carried around, never interpolated.
    Opaque(Opaque),
}

impl Value {
    /// Wraps an arbitrary payload that has no interpolation rule.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self::Opaque(Opaque::new(value))
    }

    pub fn shape(&self) -> Shape {
        match self {
            Value::Bool(_) => Shape::Bool,
            Value::Int(_) | Value::Float(_) | Value::Double(_) => {
                Shape::Scalar
            }
            Value::Point(_) => Shape::Point,
            Value::Size(_) => Shape::Size,
            Value::Rect(_) => Shape::Rect,
            #[cfg(feature = "color")]
            Value::Color(_) => Shape::Color,
            Value::Transform3D(_) => Shape::Transform3D,
            Value::Opaque(_) => Shape::Unsupported,
        }
    }

    #[inline]
    pub fn can_interpolate(&self) -> bool {
        self.shape() != Shape::Unsupported
    }

    /// Reads any numeric representation as an `f64`. Booleans map to
    /// `0.0` and `1.0`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
            Value::Int(i) => Some(i as f64),
            Value::Float(f) => Some(f as f64),
            Value::Double(d) => Some(d),
            _ => None,
        }
    }

    /// Interpolate from `self` towards `to`.
    ///
    /// Numbers are harmonized before shapes are compared: two
    /// booleans step, two values of the same floating representation
    /// keep it, and any other pair of numbers blends as `f64`.
    pub fn try_interpolate(
        &self,
        to: &Value,
        t: f64,
    ) -> Result<Value, InterpolationError> {
        if let (Some(a), Some(b)) = (self.as_f64(), to.as_f64()) {
            return Ok(match (self, to) {
                (Value::Bool(a), Value::Bool(b)) => {
                    Value::Bool(bool::interp(a, b, t))
                }
                (Value::Float(a), Value::Float(b)) => {
                    Value::Float(f32::interp(a, b, t))
                }
                _ => Value::Double(f64::interp(&a, &b, t)),
            });
        }

        for value in [self, to] {
            if let Value::Opaque(opaque) = value {
                return Err(InterpolationError::UnsupportedType {
                    type_name: opaque.type_name(),
                });
            }
        }

        match (self, to) {
            (Value::Point(a), Value::Point(b)) => {
                Ok(Value::Point(DVec2::interp(a, b, t)))
            }
            (Value::Size(a), Value::Size(b)) => {
                Ok(Value::Size(Size::interp(a, b, t)))
            }
            (Value::Rect(a), Value::Rect(b)) => {
                Ok(Value::Rect(Rect::interp(a, b, t)))
            }
            #[cfg(feature = "color")]
            (Value::Color(a), Value::Color(b)) => {
                Ok(Value::Color(Color::interp(a, b, t)))
            }
            (Value::Transform3D(a), Value::Transform3D(b)) => {
                Ok(Value::Transform3D(DMat4::interp(a, b, t)))
            }
            _ => Err(InterpolationError::TypeMismatch {
                from: self.shape(),
                to: to.shape(),
            }),
        }
    }

    /// Interpolate from `self` towards `to`.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ or are unsupported. Use
    /// [`Value::try_interpolate`] to handle that case.
    pub fn interpolate(&self, to: &Value, t: f64) -> Value {
        match self.try_interpolate(to, t) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Type-erased payload stored in [`Value::Opaque`].
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: type_name::<T>(),
            value: Arc::new(value),
        }
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }
}

impl Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Opaque").field(&self.type_name).finish()
    }
}

/// Two opaque values are equal only if they share the same payload.
impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

macro_rules! impl_value_from {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            #[inline]
            fn from(value: $ty) -> Self {
                Value::$variant(value)
            }
        }
    };
}

impl_value_from!(bool, Bool);
impl_value_from!(i64, Int);
impl_value_from!(f32, Float);
impl_value_from!(f64, Double);
impl_value_from!(DVec2, Point);
impl_value_from!(Size, Size);
impl_value_from!(Rect, Rect);
#[cfg(feature = "color")]
impl_value_from!(Color, Color);
impl_value_from!(DMat4, Transform3D);

#[cfg(test)]
mod tests {
    use bevy_math::{DQuat, DVec3};

    use super::*;

    #[test]
    fn endpoints_are_reproduced() {
        let pairs = [
            (Value::from(3.0), Value::from(-7.0)),
            (Value::from(2.0_f32), Value::from(8.0_f32)),
            (
                Value::from(DVec2::new(1.0, 2.0)),
                Value::from(DVec2::new(-3.0, 4.0)),
            ),
            (
                Value::from(Size::new(1.0, 1.0)),
                Value::from(Size::new(5.0, 9.0)),
            ),
            (
                Value::from(Rect::from_xywh(0.0, 0.0, 2.0, 2.0)),
                Value::from(Rect::from_xywh(4.0, 4.0, 8.0, 8.0)),
            ),
            (Value::from(false), Value::from(true)),
        ];

        for (a, b) in pairs {
            assert_eq!(a.interpolate(&b, 0.0), a);
            assert_eq!(a.interpolate(&b, 1.0), b);
        }
    }

    #[test]
    fn point_quarter_way() {
        let a = Value::from(DVec2::new(0.0, 0.0));
        let b = Value::from(DVec2::new(10.0, 20.0));

        assert_eq!(
            a.interpolate(&b, 0.25),
            Value::from(DVec2::new(2.5, 5.0))
        );
    }

    #[test]
    fn bool_step_threshold() {
        let a = Value::from(false);
        let b = Value::from(true);

        for t in [0.0, 0.25, 0.5] {
            assert_eq!(a.interpolate(&b, t), Value::Bool(false));
        }
        for t in [0.51, 0.75, 1.0] {
            assert_eq!(a.interpolate(&b, t), Value::Bool(true));
        }
    }

    #[test]
    fn mixed_numbers_harmonize_to_double() {
        let a = Value::from(false);
        let b = Value::from(10.0_f32);
        assert_eq!(a.interpolate(&b, 0.5), Value::Double(5.0));

        let a = Value::from(2_i64);
        let b = Value::from(4.0);
        assert_eq!(a.interpolate(&b, 0.5), Value::Double(3.0));

        let a = Value::from(2.0_f32);
        let b = Value::from(4.0_f32);
        assert_eq!(a.interpolate(&b, 0.5), Value::Float(3.0));
    }

    #[test]
    fn no_clamping() {
        let a = Value::from(0.0);
        let b = Value::from(10.0);
        assert_eq!(a.interpolate(&b, 1.5), Value::Double(15.0));

        let a = Value::from(DVec2::ZERO);
        let b = Value::from(DVec2::new(2.0, 4.0));
        assert_eq!(
            a.interpolate(&b, -1.0),
            Value::from(DVec2::new(-2.0, -4.0))
        );
    }

    #[test]
    fn mismatched_shapes_fail() {
        let a = Value::from(DVec2::ZERO);
        let b = Value::from(Size::ZERO);

        assert_eq!(
            a.try_interpolate(&b, 0.5),
            Err(InterpolationError::TypeMismatch {
                from: Shape::Point,
                to: Shape::Size,
            })
        );

        let n = Value::from(1.0);
        assert!(matches!(
            n.try_interpolate(&a, 0.5),
            Err(InterpolationError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn opaque_values_are_unsupported() {
        let a = Value::opaque(String::from("hello"));
        let b = Value::opaque(String::from("world"));

        assert!(!a.can_interpolate());
        assert_eq!(a.shape(), Shape::Unsupported);
        assert_eq!(
            a.try_interpolate(&b, 0.5),
            Err(InterpolationError::UnsupportedType {
                type_name: type_name::<String>(),
            })
        );
        assert!(matches!(
            Value::from(DVec2::ZERO).try_interpolate(&a, 0.5),
            Err(InterpolationError::UnsupportedType { .. })
        ));

        if let Value::Opaque(opaque) = &a {
            assert_eq!(
                opaque.downcast_ref::<String>().map(String::as_str),
                Some("hello")
            );
        }
    }

    #[test]
    #[should_panic(expected = "cannot interpolate")]
    fn interpolate_panics_on_mismatch() {
        Value::from(true).interpolate(&Value::from(DVec2::ZERO), 0.5);
    }

    #[test]
    fn transform_through_adapter() {
        let a = Value::from(DMat4::IDENTITY);
        let b = Value::from(DMat4::from_scale_rotation_translation(
            DVec3::new(2.0, 2.0, 1.0),
            DQuat::from_rotation_z(core::f64::consts::FRAC_PI_2),
            DVec3::new(10.0, 0.0, 0.0),
        ));

        let Value::Transform3D(m) = a.interpolate(&b, 0.5) else {
            panic!("expected a transform");
        };
        let expected = DMat4::from_scale_rotation_translation(
            DVec3::new(1.5, 1.5, 1.0),
            DQuat::from_rotation_z(core::f64::consts::FRAC_PI_4),
            DVec3::new(5.0, 0.0, 0.0),
        );
        assert!(m.abs_diff_eq(expected, 1e-9));
    }

    #[cfg(feature = "color")]
    #[test]
    fn color_through_adapter() {
        let a = Value::from(Color::srgba(1.0, 0.0, 0.0, 1.0));
        let b = Value::from(Color::srgba(0.0, 0.0, 1.0, 0.0));

        let Value::Color(c) = a.interpolate(&b, 0.5) else {
            panic!("expected a color");
        };
        assert_eq!(
            c.to_srgba(),
            Color::srgba(0.5, 0.0, 0.5, 0.5).to_srgba()
        );
        assert_eq!(a.interpolate(&b, 1.0), b);
    }
}
