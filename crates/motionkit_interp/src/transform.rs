//! Interpolation of 3D affine transforms.
//!
//! Matrices are split into translation, non-uniform scale and a
//! rotation quaternion. Translation and scale blend linearly, the
//! rotation blends spherically, and the parts are reassembled into a
//! matrix.
//!
//! All matrices follow glam's convention: column-major storage,
//! column vectors, translation in `w_axis`. A matrix is assumed to be
//! `T * R * S`, so the scale of each axis is the length of the
//! corresponding upper-left column.

use bevy_math::{DMat4, DVec3};

use crate::interpolation::Interpolation;

/// Interpolate between two affine transforms.
pub fn interpolate(a: &DMat4, b: &DMat4, t: f64) -> DMat4 {
    let from = Decomposed::new(a);
    let to = Decomposed::new(b);

    Decomposed {
        translation: DVec3::interp(&from.translation, &to.translation, t),
        scale: DVec3::interp(&from.scale, &to.scale, t),
        rotation: from.rotation.slerp(to.rotation, t),
    }
    .compose()
}

/// A matrix split into its translation, scale and rotation.
#[derive(Debug, Clone, Copy)]
struct Decomposed {
    translation: DVec3,
    scale: DVec3,
    rotation: Quaternion,
}

impl Decomposed {
    fn new(m: &DMat4) -> Self {
        let translation = m.w_axis.truncate();

        let axes = [
            m.x_axis.truncate(),
            m.y_axis.truncate(),
            m.z_axis.truncate(),
        ];
        let scale =
            DVec3::new(axes[0].length(), axes[1].length(), axes[2].length());

        // A collapsed axis carries no orientation, keep its basis
        // vector so the rotation stays well formed.
        let unit = [DVec3::X, DVec3::Y, DVec3::Z];
        let mut columns = [DVec3::ZERO; 3];
        for i in 0..3 {
            columns[i] = if scale[i] != 0.0 {
                axes[i] / scale[i]
            } else {
                unit[i]
            };
        }

        Self {
            translation,
            scale,
            rotation: Quaternion::from_rotation_columns(columns)
                .normalize(),
        }
    }

    fn compose(&self) -> DMat4 {
        let [x, y, z] = self.rotation.to_rotation_columns();

        DMat4::from_cols(
            (x * self.scale.x).extend(0.0),
            (y * self.scale.y).extend(0.0),
            (z * self.scale.z).extend(0.0),
            self.translation.extend(1.0),
        )
    }
}

/// Unit quaternion used only while blending rotations.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Quaternion {
    x: f64,
    y: f64,
    z: f64,
    w: f64,
}

impl Quaternion {
    const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    #[inline]
    fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    #[inline]
    fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::IDENTITY;
        }

        Self {
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
            w: self.w / len,
        }
    }

    /// Converts a pure rotation matrix, given as its three columns.
    ///
    /// Branches on the largest of the trace and the diagonal so the
    /// square root never gets a value close to zero.
    fn from_rotation_columns(columns: [DVec3; 3]) -> Self {
        // r(row, col)
        let r = |row: usize, col: usize| columns[col][row];
        let (m00, m11, m22) = (r(0, 0), r(1, 1), r(2, 2));
        let trace = m00 + m11 + m22;

        if trace > 0.0 {
            let t = trace + 1.0;
            let s = 0.5 / t.sqrt();
            Self {
                x: (r(2, 1) - r(1, 2)) * s,
                y: (r(0, 2) - r(2, 0)) * s,
                z: (r(1, 0) - r(0, 1)) * s,
                w: s * t,
            }
        } else if m00 > m11 && m00 > m22 {
            let t = m00 - m11 - m22 + 1.0;
            let s = 0.5 / t.sqrt();
            Self {
                x: s * t,
                y: (r(0, 1) + r(1, 0)) * s,
                z: (r(0, 2) + r(2, 0)) * s,
                w: (r(2, 1) - r(1, 2)) * s,
            }
        } else if m11 > m22 {
            let t = -m00 + m11 - m22 + 1.0;
            let s = 0.5 / t.sqrt();
            Self {
                x: (r(0, 1) + r(1, 0)) * s,
                y: s * t,
                z: (r(1, 2) + r(2, 1)) * s,
                w: (r(0, 2) - r(2, 0)) * s,
            }
        } else {
            let t = -m00 - m11 + m22 + 1.0;
            let s = 0.5 / t.sqrt();
            Self {
                x: (r(0, 2) + r(2, 0)) * s,
                y: (r(1, 2) + r(2, 1)) * s,
                z: s * t,
                w: (r(1, 0) - r(0, 1)) * s,
            }
        }
    }

    /// Returns the columns of the rotation matrix.
    fn to_rotation_columns(self) -> [DVec3; 3] {
        let Self { x, y, z, w } = self;

        [
            DVec3::new(
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y + w * z),
                2.0 * (x * z - w * y),
            ),
            DVec3::new(
                2.0 * (x * y - w * z),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z + w * x),
            ),
            DVec3::new(
                2.0 * (x * z + w * y),
                2.0 * (y * z - w * x),
                1.0 - 2.0 * (x * x + y * y),
            ),
        ]
    }

    /// Spherical interpolation towards `to`.
    fn slerp(self, to: Self, t: f64) -> Self {
        // Drift can push the dot of two equal unit quaternions past 1.
        let dp = self.dot(to).clamp(-1.0, 1.0);

        let mut theta = dp.acos();
        if theta == 0.0 {
            return self;
        }
        if theta < 1.0 {
            theta = -theta;
        }

        let st = theta.sin();
        let coeff1 = ((1.0 - t) * theta).sin() / st;
        let coeff2 = (t * theta).sin() / st;

        Self {
            x: coeff1 * self.x + coeff2 * to.x,
            y: coeff1 * self.y + coeff2 * to.y,
            z: coeff1 * self.z + coeff2 * to.z,
            w: coeff1 * self.w + coeff2 * to.w,
        }
        .normalize()
    }
}
