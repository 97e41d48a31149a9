//! [`Value`]: value::Value
//! [`Interpolation`]: interpolation::Interpolation
//!
//! # MotionKit Interp
//!
//! Blends two endpoints of the same shape at a normalized position.
//!
//! - **[`Interpolation`]**: the typed per-shape rule. Scalars and
//!   geometry blend linearly, booleans step at `t > 0.5`, colors
//!   blend per sRGB channel and 3D transforms are decomposed and
//!   blended with a quaternion slerp.
//!
//! - **[`Value`]**: a shape-tagged box over every supported type.
//!   Animation backends only ever hold [`Value`]s and call
//!   [`Value::interpolate`](value::Value::interpolate), which
//!   dispatches on the shape and rejects incompatible pairs.
//!
//! ```
//! use motionkit_interp::prelude::*;
//!
//! let a = Value::from(DVec2::new(0.0, 0.0));
//! let b = Value::from(DVec2::new(10.0, 20.0));
//!
//! assert_eq!(a.interpolate(&b, 0.25), Value::from(DVec2::new(2.5, 5.0)));
//! ```

extern crate alloc;

pub mod error;
pub mod geometry;
pub mod interpolation;
pub mod transform;
pub mod value;

pub mod prelude {
    pub use bevy_math::{DMat4, DVec2, DVec3};

    pub use crate::error::InterpolationError;
    pub use crate::geometry::{Rect, Size};
    pub use crate::interpolation::{step, Interpolation};
    pub use crate::value::{Opaque, Shape, Value};
}
