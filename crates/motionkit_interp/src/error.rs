use thiserror::Error;

use crate::value::Shape;

/// Reasons a pair of [`Value`](crate::value::Value)s cannot be
/// interpolated. Both are programming errors: the endpoints of an
/// animation should come from the same source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpolationError {
    #[error("cannot interpolate between {from:?} and {to:?} values")]
    TypeMismatch { from: Shape, to: Shape },
    #[error("interpolation does not support values of type `{type_name}`")]
    UnsupportedType { type_name: &'static str },
}
