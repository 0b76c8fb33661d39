// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides a Quaternion type for representing 3D rotations.

use serde::{Deserialize, Serialize};

use super::{approx_eq, degrees_to_radians, radians_to_degrees, Matrix4x4, Vector3, EPSILON};
use std::fmt;
use std::ops::{Mul, MulAssign, Neg};

/// Represents a quaternion for efficient 3D rotations.
///
/// A quaternion is stored as `(x, y, z, w)`, where `[x, y, z]` is the
/// "vector" part and `w` is the "scalar" part. For representing rotations it
/// should be a unit quaternion, but **unit length is not enforced**:
/// normalization is opt-in via [`Quaternion::normalize`], and arbitrary
/// non-unit instances are legal values.
///
/// Composition is the Hamilton product: `lhs * rhs` applies `rhs` first and
/// then `lhs`, the standard engine convention.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[repr(C)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
    /// The scalar (real) part.
    pub w: f32,
}

impl Default for Quaternion {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a new quaternion from its raw components.
    ///
    /// Note: This does not guarantee a unit quaternion. For creating
    /// rotations, prefer [`Quaternion::angle_axis`] or another
    /// rotation-specific constructor.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion rotating `angle_degrees` around `axis`.
    ///
    /// The axis is normalized first; a degenerate (near zero) axis therefore
    /// collapses to the zero vector and the result is the identity rotation
    /// regardless of the angle.
    #[inline]
    pub fn angle_axis(angle_degrees: f32, axis: Vector3) -> Self {
        let normalized_axis = axis.normalized();
        let half_angle = degrees_to_radians(angle_degrees) * 0.5;
        let s = half_angle.sin();
        let c = half_angle.cos();
        Self {
            x: normalized_axis.x * s,
            y: normalized_axis.y * s,
            z: normalized_axis.z * s,
            w: c,
        }
    }

    /// Calculates the dot product of two quaternions.
    #[inline]
    pub fn dot(a: Self, b: Self) -> f32 {
        a.x * b.x + a.y * b.y + a.z * b.z + a.w * b.w
    }

    /// Calculates the squared magnitude of the quaternion.
    #[inline]
    pub fn sqr_magnitude(&self) -> f32 {
        Self::dot(*self, *self)
    }

    /// Calculates the magnitude of the quaternion.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.sqr_magnitude().sqrt()
    }

    /// Returns the conjugate `(-x, -y, -z, w)`.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Normalizes the quaternion in place to unit length.
    ///
    /// If the current magnitude is at or below [`EPSILON`], the quaternion
    /// is reset to [`Quaternion::IDENTITY`]. Note the asymmetry with the
    /// vector types, which fall back to zero: a degenerate rotation decays
    /// to "no rotation", which is the value downstream transform math can
    /// keep consuming.
    #[inline]
    pub fn normalize(&mut self) {
        let magnitude = self.magnitude();
        if magnitude > EPSILON {
            let inv = 1.0 / magnitude;
            self.x *= inv;
            self.y *= inv;
            self.z *= inv;
            self.w *= inv;
        } else {
            *self = Self::IDENTITY;
        }
    }

    /// Returns a normalized copy of the quaternion.
    ///
    /// See [`Quaternion::normalize`] for the degenerate-input fallback.
    #[inline]
    pub fn normalized(&self) -> Self {
        let mut result = *self;
        result.normalize();
        result
    }

    /// Returns the inverse rotation.
    ///
    /// For a unit quaternion this is the conjugate; in general it is the
    /// conjugate scaled by `1 / dot(q, q)`. When `dot(q, q)` is below
    /// [`EPSILON`] the quaternion carries no usable rotation and
    /// [`Quaternion::IDENTITY`] is returned instead of failing.
    #[inline]
    pub fn inverse(&self) -> Self {
        let n = self.sqr_magnitude();
        if n < EPSILON {
            return Self::IDENTITY;
        }
        let inv = 1.0 / n;
        let c = self.conjugate();
        Self {
            x: c.x * inv,
            y: c.y * inv,
            z: c.z * inv,
            w: c.w * inv,
        }
    }

    /// Performs a normalized linear interpolation between two rotations.
    ///
    /// `t` is clamped to `[0.0, 1.0]`. When the rotations lie on opposite
    /// hemispheres, `end` is negated first so the interpolation takes the
    /// shorter arc. The result is normalized.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let end = if Self::dot(start, end) < 0.0 { -end } else { end };
        let mut result = Self {
            x: start.x + (end.x - start.x) * t,
            y: start.y + (end.y - start.y) * t,
            z: start.z + (end.z - start.z) * t,
            w: start.w + (end.w - start.w) * t,
        };
        result.normalize();
        result
    }

    /// Performs a spherical interpolation between two rotations.
    ///
    /// `t` is clamped to `[0.0, 1.0]`. `end` is negated when the dot
    /// product is negative so the shorter arc is taken; when the rotations
    /// are nearly parallel (`dot > 0.9995`) the spherical weights become
    /// numerically unstable and the implementation falls back to
    /// [`Quaternion::lerp`].
    pub fn slerp(start: Self, end: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut dot = Self::dot(start, end);
        let end = if dot < 0.0 {
            dot = -dot;
            -end
        } else {
            end
        };

        if dot > 0.9995 {
            return Self::lerp(start, end, t);
        }

        let theta = dot.clamp(-1.0, 1.0).acos();
        let sin_theta = theta.sin();
        let w_start = ((1.0 - t) * theta).sin() / sin_theta;
        let w_end = (t * theta).sin() / sin_theta;
        Self {
            x: start.x * w_start + end.x * w_end,
            y: start.y * w_start + end.y * w_end,
            z: start.z * w_start + end.z * w_end,
            w: start.w * w_start + end.w * w_end,
        }
    }

    /// Creates a rotation from Euler angles in degrees.
    ///
    /// The composition order is ZYX: the X rotation is applied first, then
    /// Y, then Z (`Qz * Qy * Qx` under the Hamilton product).
    pub fn from_euler(x_degrees: f32, y_degrees: f32, z_degrees: f32) -> Self {
        let qx = Self::angle_axis(x_degrees, Vector3::X);
        let qy = Self::angle_axis(y_degrees, Vector3::Y);
        let qz = Self::angle_axis(z_degrees, Vector3::Z);
        qz * qy * qx
    }

    /// Extracts Euler angles in degrees, inverting [`Quaternion::from_euler`].
    ///
    /// The pitch term is clamped before the `asin` so that accumulated
    /// float error near the gimbal poles cannot produce a NaN.
    pub fn to_euler(&self) -> Vector3 {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);

        let sin_x = 2.0 * (w * x + y * z);
        let cos_x = 1.0 - 2.0 * (x * x + y * y);
        let angle_x = sin_x.atan2(cos_x);

        let sin_y = (2.0 * (w * y - z * x)).clamp(-1.0, 1.0);
        let angle_y = sin_y.asin();

        let sin_z = 2.0 * (w * z + x * y);
        let cos_z = 1.0 - 2.0 * (y * y + z * z);
        let angle_z = sin_z.atan2(cos_z);

        Vector3::new(
            radians_to_degrees(angle_x),
            radians_to_degrees(angle_y),
            radians_to_degrees(angle_z),
        )
    }

    /// Creates a rotation looking along `forward` with the head tilted
    /// toward `up`.
    ///
    /// Builds an orthonormal basis from two cross products, then extracts
    /// the quaternion from the resulting rotation matrix. Returns
    /// [`Quaternion::IDENTITY`] when `forward` is degenerate or parallel
    /// to `up`.
    pub fn look_rotation(forward: Vector3, up: Vector3) -> Self {
        let forward = forward.normalized();
        if forward == Vector3::ZERO {
            return Self::IDENTITY;
        }
        let right = up.cross(forward).normalized();
        if right == Vector3::ZERO {
            return Self::IDENTITY;
        }
        let up = forward.cross(right);

        let m = Matrix4x4::from_basis_rows(right, up, forward);
        Self::from_rotation_matrix(&m)
    }

    /// Extracts a quaternion from the upper 3x3 of a rotation matrix.
    ///
    /// The matrix is assumed to be a pure rotation in the row-vector
    /// convention. The extraction branches on the trace and, when the trace
    /// is non-positive, on the dominant diagonal element; all four branches
    /// must agree on sign conventions for the result to round-trip with
    /// [`Matrix4x4::rotation_quaternion`].
    pub fn from_rotation_matrix(m: &Matrix4x4) -> Self {
        let trace = m.m11 + m.m22 + m.m33;
        if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self {
                x: (m.m23 - m.m32) / s,
                y: (m.m31 - m.m13) / s,
                z: (m.m12 - m.m21) / s,
                w: s * 0.25,
            }
        } else if m.m11 > m.m22 && m.m11 > m.m33 {
            let s = (1.0 + m.m11 - m.m22 - m.m33).sqrt() * 2.0;
            Self {
                x: s * 0.25,
                y: (m.m12 + m.m21) / s,
                z: (m.m31 + m.m13) / s,
                w: (m.m23 - m.m32) / s,
            }
        } else if m.m22 > m.m33 {
            let s = (1.0 + m.m22 - m.m11 - m.m33).sqrt() * 2.0;
            Self {
                x: (m.m12 + m.m21) / s,
                y: s * 0.25,
                z: (m.m23 + m.m32) / s,
                w: (m.m31 - m.m13) / s,
            }
        } else {
            let s = (1.0 + m.m33 - m.m11 - m.m22).sqrt() * 2.0;
            Self {
                x: (m.m31 + m.m13) / s,
                y: (m.m23 + m.m32) / s,
                z: s * 0.25,
                w: (m.m12 - m.m21) / s,
            }
        }
    }
}

// --- Operator Overloads ---

impl Mul for Quaternion {
    type Output = Self;
    /// Composes two rotations with the Hamilton product.
    ///
    /// Non-commutative: `lhs * rhs` applies `rhs` first, then `lhs`.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y + self.y * rhs.w + self.z * rhs.x - self.x * rhs.z,
            z: self.w * rhs.z + self.z * rhs.w + self.x * rhs.y - self.y * rhs.x,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

impl MulAssign for Quaternion {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;
    /// Rotates a vector by this quaternion.
    #[inline]
    fn mul(self, rhs: Vector3) -> Self::Output {
        let u = Vector3::new(self.x, self.y, self.z);
        let uv = u.cross(rhs);
        let uuv = u.cross(uv);
        rhs + (uv * self.w + uuv) * 2.0
    }
}

impl Neg for Quaternion {
    type Output = Self;
    /// Negates all four components.
    ///
    /// `-q` represents the same rotation as `q`; negation is used to pick
    /// the shorter interpolation arc.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w,
        }
    }
}

/// Component-wise equality within [`EPSILON`].
impl PartialEq for Quaternion {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x)
            && approx_eq(self.y, other.y)
            && approx_eq(self.z, other.z)
            && approx_eq(self.w, other.w)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

// --- Tests ---
