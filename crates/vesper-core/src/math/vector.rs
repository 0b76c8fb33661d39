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

//! Provides 2D, 3D, and 4D vector types and their associated operations.
//!
//! All three types share the same error model: indexing out of range and
//! dividing by a zero scalar panic, while normalizing a degenerate (near
//! zero length) vector silently falls back to the zero vector. The panic
//! on division and the silent normalize fallback are deliberately
//! asymmetric; callers rely on both behaviors.

use serde::{Deserialize, Serialize};

use super::{approx_eq, EPSILON};
use std::fmt;
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

// --- Vector2 ---

/// A 2-dimensional vector with `f32` components.
#[derive(Debug, Default, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Vector2 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
}

impl Vector2 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    /// A vector with all components set to `1.0`.
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self { x: 1.0, y: 0.0 };
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self { x: 0.0, y: 1.0 };

    /// Creates a new `Vector2` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculates the squared magnitude of the vector.
    /// This is faster than `magnitude()` as it avoids a square root.
    #[inline]
    pub fn sqr_magnitude(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the magnitude (length) of the vector.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.sqr_magnitude().sqrt()
    }

    /// Normalizes the vector in place to a magnitude of 1.
    ///
    /// If the current magnitude is at or below [`EPSILON`], the vector is
    /// reset to [`Vector2::ZERO`] instead. This degenerate case is a
    /// well-defined fallback, not an error.
    #[inline]
    pub fn normalize(&mut self) {
        let magnitude = self.magnitude();
        if magnitude > EPSILON {
            *self = *self / magnitude;
        } else {
            *self = Self::ZERO;
        }
    }

    /// Returns a normalized copy of the vector.
    ///
    /// See [`Vector2::normalize`] for the degenerate-input fallback.
    #[inline]
    pub fn normalized(&self) -> Self {
        let mut result = *self;
        result.normalize();
        result
    }

    /// Calculates the dot product of this vector and another.
    #[inline]
    pub fn dot(&self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Calculates the distance between two points.
    #[inline]
    pub fn distance(&self, other: Self) -> f32 {
        (*self - other).magnitude()
    }

    /// Calculates the squared distance between two points.
    #[inline]
    pub fn sqr_distance(&self, other: Self) -> f32 {
        (*self - other).sqr_magnitude()
    }

    /// Performs a linear interpolation between two vectors.
    /// The interpolation factor `t` is clamped to the `[0.0, 1.0]` range.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        Self::lerp_unclamped(start, end, t.clamp(0.0, 1.0))
    }

    /// Performs a linear interpolation between two vectors without clamping `t`.
    #[inline]
    pub fn lerp_unclamped(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    /// Returns a copy of the vector with its magnitude clamped to `max_magnitude`.
    #[inline]
    pub fn clamp_magnitude(&self, max_magnitude: f32) -> Self {
        if self.sqr_magnitude() > max_magnitude * max_magnitude {
            self.normalized() * max_magnitude
        } else {
            *self
        }
    }

    /// Returns the component-wise minimum of two vectors.
    #[inline]
    pub fn min(a: Self, b: Self) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y))
    }

    /// Returns the component-wise maximum of two vectors.
    #[inline]
    pub fn max(a: Self, b: Self) -> Self {
        Self::new(a.x.max(b.x), a.y.max(b.y))
    }

    /// Multiplies two vectors component-wise.
    #[inline]
    pub fn scale(&self, other: Self) -> Self {
        *self * other
    }

    /// Moves a point toward a target, covering at most `max_delta` distance.
    ///
    /// Snaps to `target` when the remaining distance is within `max_delta`,
    /// or when `current` and `target` already coincide.
    #[inline]
    pub fn move_towards(current: Self, target: Self, max_delta: f32) -> Self {
        let delta = target - current;
        let distance = delta.magnitude();
        if distance <= max_delta || distance <= EPSILON {
            target
        } else {
            current + delta / distance * max_delta
        }
    }
}

/// Component-wise equality within [`EPSILON`].
impl PartialEq for Vector2 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// --- Operator Overloads ---

impl Add for Vector2 {
    type Output = Self;
    /// Adds two vectors component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Vector2 {
    type Output = Self;
    /// Subtracts two vectors component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;
    /// Multiplies the vector by a scalar.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Mul<Vector2> for f32 {
    type Output = Vector2;
    /// Multiplies a scalar by a vector.
    #[inline]
    fn mul(self, rhs: Vector2) -> Self::Output {
        rhs * self
    }
}

impl Mul<Vector2> for Vector2 {
    type Output = Self;
    /// Multiplies two vectors component-wise.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
        }
    }
}

impl Div<f32> for Vector2 {
    type Output = Self;
    /// Divides the vector by a scalar.
    ///
    /// # Panics
    /// Panics if `rhs` is zero.
    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        if rhs == 0.0 {
            panic!("attempt to divide Vector2 by zero");
        }
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}

impl Neg for Vector2 {
    type Output = Self;
    /// Negates the vector.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Index<usize> for Vector2 {
    type Output = f32;
    /// Allows accessing a vector component by index.
    /// # Panics
    /// Panics if `index` is not 0 or 1.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Index out of bounds for Vector2"),
        }
    }
}

impl IndexMut<usize> for Vector2 {
    /// Allows mutably accessing a vector component by index.
    /// # Panics
    /// Panics if `index` is not 0 or 1.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Index out of bounds for Vector2"),
        }
    }
}

// --- Vector3 ---

/// A 3-dimensional vector with `f32` components.
///
/// The directional constants follow the engine's left-handed, Y-up,
/// Z-forward convention: [`Vector3::FORWARD`] is `+Z` and
/// [`Vector3::RIGHT`] is `+X`.
#[derive(Debug, Default, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Vector3 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
}

impl Vector3 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    /// A vector with all components set to `1.0`.
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// The unit vector pointing along the positive Z-axis.
    pub const Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };
    /// The world up direction, `+Y`.
    pub const UP: Self = Self::Y;
    /// The world down direction, `-Y`.
    pub const DOWN: Self = Self {
        x: 0.0,
        y: -1.0,
        z: 0.0,
    };
    /// The world right direction, `+X`.
    pub const RIGHT: Self = Self::X;
    /// The world left direction, `-X`.
    pub const LEFT: Self = Self {
        x: -1.0,
        y: 0.0,
        z: 0.0,
    };
    /// The world forward direction, `+Z` (left-handed convention).
    pub const FORWARD: Self = Self::Z;
    /// The world back direction, `-Z`.
    pub const BACK: Self = Self {
        x: 0.0,
        y: 0.0,
        z: -1.0,
    };

    /// Creates a new `Vector3` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Calculates the squared magnitude of the vector.
    /// This is faster than `magnitude()` as it avoids a square root.
    #[inline]
    pub fn sqr_magnitude(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the magnitude (length) of the vector.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.sqr_magnitude().sqrt()
    }

    /// Normalizes the vector in place to a magnitude of 1.
    ///
    /// If the current magnitude is at or below [`EPSILON`], the vector is
    /// reset to [`Vector3::ZERO`] instead. This degenerate case is a
    /// well-defined fallback, not an error.
    #[inline]
    pub fn normalize(&mut self) {
        let magnitude = self.magnitude();
        if magnitude > EPSILON {
            *self = *self / magnitude;
        } else {
            *self = Self::ZERO;
        }
    }

    /// Returns a normalized copy of the vector.
    ///
    /// See [`Vector3::normalize`] for the degenerate-input fallback.
    #[inline]
    pub fn normalized(&self) -> Self {
        let mut result = *self;
        result.normalize();
        result
    }

    /// Calculates the dot product of this vector and another.
    #[inline]
    pub fn dot(&self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Calculates the cross product of this vector and another.
    ///
    /// Uses the right-handed formula; combined with the engine's left-handed
    /// axes this yields the conventional basis relations
    /// (`X.cross(Y) == Z`).
    #[inline]
    pub fn cross(&self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Calculates the distance between two points.
    #[inline]
    pub fn distance(&self, other: Self) -> f32 {
        (*self - other).magnitude()
    }

    /// Calculates the squared distance between two points.
    #[inline]
    pub fn sqr_distance(&self, other: Self) -> f32 {
        (*self - other).sqr_magnitude()
    }

    /// Performs a linear interpolation between two vectors.
    /// The interpolation factor `t` is clamped to the `[0.0, 1.0]` range.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        Self::lerp_unclamped(start, end, t.clamp(0.0, 1.0))
    }

    /// Performs a linear interpolation between two vectors without clamping `t`.
    #[inline]
    pub fn lerp_unclamped(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    /// Returns a copy of the vector with its magnitude clamped to `max_magnitude`.
    #[inline]
    pub fn clamp_magnitude(&self, max_magnitude: f32) -> Self {
        if self.sqr_magnitude() > max_magnitude * max_magnitude {
            self.normalized() * max_magnitude
        } else {
            *self
        }
    }

    /// Returns the component-wise minimum of two vectors.
    #[inline]
    pub fn min(a: Self, b: Self) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
    }

    /// Returns the component-wise maximum of two vectors.
    #[inline]
    pub fn max(a: Self, b: Self) -> Self {
        Self::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
    }

    /// Multiplies two vectors component-wise.
    #[inline]
    pub fn scale(&self, other: Self) -> Self {
        *self * other
    }

    /// Moves a point toward a target, covering at most `max_delta` distance.
    ///
    /// Snaps to `target` when the remaining distance is within `max_delta`,
    /// or when `current` and `target` already coincide.
    #[inline]
    pub fn move_towards(current: Self, target: Self, max_delta: f32) -> Self {
        let delta = target - current;
        let distance = delta.magnitude();
        if distance <= max_delta || distance <= EPSILON {
            target
        } else {
            current + delta / distance * max_delta
        }
    }
}

/// Component-wise equality within [`EPSILON`].
impl PartialEq for Vector3 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y) && approx_eq(self.z, other.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// --- Operator Overloads ---

impl Add for Vector3 {
    type Output = Self;
    /// Adds two vectors component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Vector3 {
    type Output = Self;
    /// Subtracts two vectors component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;
    /// Multiplies the vector by a scalar.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl Mul<Vector3> for f32 {
    type Output = Vector3;
    /// Multiplies a scalar by a vector.
    #[inline]
    fn mul(self, rhs: Vector3) -> Self::Output {
        rhs * self
    }
}

impl Mul<Vector3> for Vector3 {
    type Output = Self;
    /// Multiplies two vectors component-wise.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
            z: self.z * rhs.z,
        }
    }
}

impl Div<f32> for Vector3 {
    type Output = Self;
    /// Divides the vector by a scalar.
    ///
    /// # Panics
    /// Panics if `rhs` is zero.
    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        if rhs == 0.0 {
            panic!("attempt to divide Vector3 by zero");
        }
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

impl Neg for Vector3 {
    type Output = Self;
    /// Negates the vector.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Index<usize> for Vector3 {
    type Output = f32;
    /// Allows accessing a vector component by index.
    /// # Panics
    /// Panics if `index` is not 0, 1, or 2.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Index out of bounds for Vector3"),
        }
    }
}

impl IndexMut<usize> for Vector3 {
    /// Allows mutably accessing a vector component by index.
    /// # Panics
    /// Panics if `index` is not 0, 1, or 2.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Index out of bounds for Vector3"),
        }
    }
}

// --- Vector4 ---

/// A 4-dimensional vector with `f32` components, often used for homogeneous coordinates.
///
/// In 3D graphics, `Vector4` primarily represents points (`w` = 1.0) and
/// directions (`w` = 0.0) in homogeneous space, allowing them to be
/// transformed by a [`crate::math::Matrix4x4`].
#[derive(Debug, Default, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Vector4 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
    /// The w component, used for homogeneous coordinates.
    pub w: f32,
}

impl Vector4 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
    };
    /// A vector with all components set to `1.0`.
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
        w: 1.0,
    };
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
    };
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
        w: 0.0,
    };
    /// The unit vector pointing along the positive Z-axis.
    pub const Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
        w: 0.0,
    };
    /// The unit vector pointing along the positive W-axis.
    pub const W: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a new `Vector4` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a `Vector4` from a `Vector3` and a `w` component.
    #[inline]
    pub fn from_vector3(v: Vector3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Returns the `[x, y, z]` components of the vector as a `Vector3`, discarding `w`.
    #[inline]
    pub fn truncate(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Calculates the squared magnitude of the vector.
    /// This is faster than `magnitude()` as it avoids a square root.
    #[inline]
    pub fn sqr_magnitude(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the magnitude (length) of the vector.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.sqr_magnitude().sqrt()
    }

    /// Normalizes the vector in place to a magnitude of 1.
    ///
    /// If the current magnitude is at or below [`EPSILON`], the vector is
    /// reset to [`Vector4::ZERO`] instead. This degenerate case is a
    /// well-defined fallback, not an error.
    #[inline]
    pub fn normalize(&mut self) {
        let magnitude = self.magnitude();
        if magnitude > EPSILON {
            *self = *self / magnitude;
        } else {
            *self = Self::ZERO;
        }
    }

    /// Returns a normalized copy of the vector.
    ///
    /// See [`Vector4::normalize`] for the degenerate-input fallback.
    #[inline]
    pub fn normalized(&self) -> Self {
        let mut result = *self;
        result.normalize();
        result
    }

    /// Calculates the dot product of this vector and another.
    #[inline]
    pub fn dot(&self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    /// Calculates the distance between two points.
    #[inline]
    pub fn distance(&self, other: Self) -> f32 {
        (*self - other).magnitude()
    }

    /// Performs a linear interpolation between two vectors.
    /// The interpolation factor `t` is clamped to the `[0.0, 1.0]` range.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        Self::lerp_unclamped(start, end, t.clamp(0.0, 1.0))
    }

    /// Performs a linear interpolation between two vectors without clamping `t`.
    #[inline]
    pub fn lerp_unclamped(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    /// Returns a copy of the vector with its magnitude clamped to `max_magnitude`.
    #[inline]
    pub fn clamp_magnitude(&self, max_magnitude: f32) -> Self {
        if self.sqr_magnitude() > max_magnitude * max_magnitude {
            self.normalized() * max_magnitude
        } else {
            *self
        }
    }

    /// Returns the component-wise minimum of two vectors.
    #[inline]
    pub fn min(a: Self, b: Self) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z), a.w.min(b.w))
    }

    /// Returns the component-wise maximum of two vectors.
    #[inline]
    pub fn max(a: Self, b: Self) -> Self {
        Self::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z), a.w.max(b.w))
    }

    /// Multiplies two vectors component-wise.
    #[inline]
    pub fn scale(&self, other: Self) -> Self {
        *self * other
    }

    /// Moves a point toward a target, covering at most `max_delta` distance.
    ///
    /// Snaps to `target` when the remaining distance is within `max_delta`,
    /// or when `current` and `target` already coincide.
    #[inline]
    pub fn move_towards(current: Self, target: Self, max_delta: f32) -> Self {
        let delta = target - current;
        let distance = delta.magnitude();
        if distance <= max_delta || distance <= EPSILON {
            target
        } else {
            current + delta / distance * max_delta
        }
    }
}

/// Component-wise equality within [`EPSILON`].
impl PartialEq for Vector4 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x)
            && approx_eq(self.y, other.y)
            && approx_eq(self.z, other.z)
            && approx_eq(self.w, other.w)
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

// --- Operator Overloads ---

impl Add for Vector4 {
    type Output = Self;
    /// Adds two vectors component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            w: self.w + rhs.w,
        }
    }
}

impl Sub for Vector4 {
    type Output = Self;
    /// Subtracts two vectors component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
            w: self.w - rhs.w,
        }
    }
}

impl Mul<f32> for Vector4 {
    type Output = Self;
    /// Multiplies the vector by a scalar.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
            w: self.w * rhs,
        }
    }
}

impl Mul<Vector4> for f32 {
    type Output = Vector4;
    /// Multiplies a scalar by a vector.
    #[inline]
    fn mul(self, rhs: Vector4) -> Self::Output {
        rhs * self
    }
}

impl Mul<Vector4> for Vector4 {
    type Output = Self;
    /// Multiplies two vectors component-wise.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
            z: self.z * rhs.z,
            w: self.w * rhs.w,
        }
    }
}

impl Div<f32> for Vector4 {
    type Output = Self;
    /// Divides the vector by a scalar.
    ///
    /// # Panics
    /// Panics if `rhs` is zero.
    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        if rhs == 0.0 {
            panic!("attempt to divide Vector4 by zero");
        }
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
            w: self.w / rhs,
        }
    }
}

impl Neg for Vector4 {
    type Output = Self;
    /// Negates the vector.
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

impl Index<usize> for Vector4 {
    type Output = f32;
    /// Allows accessing a vector component by index.
    /// # Panics
    /// Panics if `index` is not between 0 and 3.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Index out of bounds for Vector4"),
        }
    }
}

impl IndexMut<usize> for Vector4 {
    /// Allows mutably accessing a vector component by index.
    /// # Panics
    /// Panics if `index` is not between 0 and 3.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Index out of bounds for Vector4"),
        }
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq_eps;

    #[test]
    fn test_add() {
        let v1 = Vector3::new(1.0, 2.0, 3.0);
        let v2 = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(v1 + v2, Vector3::new(5.0, 7.0, 9.0));
    }

    #[test]
    fn test_sub() {
        let v1 = Vector3::new(5.0, 7.0, 9.0);
        let v2 = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v1 - v2, Vector3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_scalar_mul() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(3.0 * v, Vector3::new(3.0, 6.0, 9.0)); // Test f32 * Vector3
    }

    #[test]
    fn test_component_mul() {
        let v1 = Vector3::new(1.0, 2.0, 3.0);
        let v2 = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(v1 * v2, Vector3::new(4.0, 10.0, 18.0));
        assert_eq!(v1.scale(v2), Vector3::new(4.0, 10.0, 18.0));
    }

    #[test]
    fn test_scalar_div() {
        let v = Vector3::new(2.0, 4.0, 6.0);
        assert_eq!(v / 2.0, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    #[should_panic(expected = "divide Vector3 by zero")]
    fn test_scalar_div_by_zero_panics() {
        let _ = Vector3::ONE / 0.0;
    }

    #[test]
    fn test_neg() {
        let v = Vector3::new(1.0, -2.0, 3.0);
        assert_eq!(-v, Vector3::new(-1.0, 2.0, -3.0));
    }

    #[test]
    fn test_magnitude() {
        let v1 = Vector3::new(3.0, 4.0, 0.0);
        assert!(approx_eq(v1.sqr_magnitude(), 25.0));
        assert!(approx_eq(v1.magnitude(), 5.0));

        let v2 = Vector3::ZERO;
        assert!(approx_eq(v2.sqr_magnitude(), 0.0));
        assert!(approx_eq(v2.magnitude(), 0.0));
    }

    #[test]
    fn test_dot() {
        let v1 = Vector3::new(1.0, 2.0, 3.0);
        let v2 = Vector3::new(4.0, -5.0, 6.0);
        // 1*4 + 2*(-5) + 3*6 = 4 - 10 + 18 = 12
        assert!(approx_eq(v1.dot(v2), 12.0));

        // Orthogonal vectors
        assert!(approx_eq(Vector3::X.dot(Vector3::Y), 0.0));
    }

    #[test]
    fn test_distance() {
        let v1 = Vector3::new(1.0, 2.0, 3.0);
        let v2 = Vector3::new(4.0, 5.0, 6.0);
        // sqrt(9 + 9 + 9) = 3*sqrt(3)
        assert!(approx_eq_eps(v1.distance(v2), 3.0 * (3.0_f32).sqrt(), 1e-5));
        assert!(approx_eq(v1.sqr_distance(v2), 27.0));
    }

    #[test]
    fn test_cross() {
        // Standard basis vectors
        assert_eq!(Vector3::X.cross(Vector3::Y), Vector3::Z);
        assert_eq!(Vector3::Y.cross(Vector3::Z), Vector3::X);
        assert_eq!(Vector3::Z.cross(Vector3::X), Vector3::Y);

        // Anti-commutative property
        assert_eq!(Vector3::Y.cross(Vector3::X), -Vector3::Z);

        // Parallel vectors
        assert_eq!(Vector3::X.cross(Vector3::X), Vector3::ZERO);
    }

    #[test]
    fn test_normalize_in_place() {
        let mut v = Vector3::new(3.0, 0.0, 0.0);
        v.normalize();
        assert_eq!(v, Vector3::X);
        assert!(approx_eq_eps(v.magnitude(), 1.0, 1e-5));

        let mut v2 = Vector3::new(1.0, 1.0, 1.0);
        v2.normalize();
        assert!(approx_eq_eps(v2.magnitude(), 1.0, 1e-5));
    }

    #[test]
    fn test_normalize_degenerate_falls_back_to_zero() {
        let mut v = Vector3::ZERO;
        v.normalize();
        assert_eq!(v, Vector3::ZERO);

        // Below the epsilon threshold, not just exactly zero.
        let mut tiny = Vector3::new(1e-8, 0.0, 0.0);
        tiny.normalize();
        assert_eq!(tiny, Vector3::ZERO);
    }

    #[test]
    fn test_lerp() {
        let start = Vector3::new(0.0, 0.0, 0.0);
        let end = Vector3::new(10.0, 10.0, 10.0);

        assert_eq!(Vector3::lerp(start, end, 0.0), start);
        assert_eq!(Vector3::lerp(start, end, 1.0), end);
        assert_eq!(Vector3::lerp(start, end, 0.5), Vector3::new(5.0, 5.0, 5.0));

        // Clamped variant saturates outside [0, 1].
        assert_eq!(Vector3::lerp(start, end, 2.0), end);
        assert_eq!(
            Vector3::lerp_unclamped(start, end, 2.0),
            Vector3::new(20.0, 20.0, 20.0)
        );
    }

    #[test]
    fn test_clamp_magnitude() {
        let v = Vector3::new(10.0, 0.0, 0.0);
        assert_eq!(v.clamp_magnitude(5.0), Vector3::new(5.0, 0.0, 0.0));

        // Already within the limit: unchanged.
        let short = Vector3::new(1.0, 0.0, 0.0);
        assert_eq!(short.clamp_magnitude(5.0), short);
    }

    #[test]
    fn test_min_max() {
        let a = Vector3::new(1.0, 5.0, -2.0);
        let b = Vector3::new(3.0, 2.0, -4.0);
        assert_eq!(Vector3::min(a, b), Vector3::new(1.0, 2.0, -4.0));
        assert_eq!(Vector3::max(a, b), Vector3::new(3.0, 5.0, -2.0));
    }

    #[test]
    fn test_move_towards() {
        let current = Vector3::ZERO;
        let target = Vector3::new(10.0, 0.0, 0.0);

        // Moves at most max_delta.
        assert_eq!(
            Vector3::move_towards(current, target, 3.0),
            Vector3::new(3.0, 0.0, 0.0)
        );

        // Snaps to the target when within range.
        assert_eq!(Vector3::move_towards(current, target, 15.0), target);

        // Coincident points stay put (and do not divide by zero).
        assert_eq!(Vector3::move_towards(target, target, 1.0), target);
    }

    #[test]
    fn test_index() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[1], 2.0);
        assert_eq!(v[2], 3.0);
    }

    #[test]
    #[should_panic(expected = "Index out of bounds for Vector3")]
    fn test_index_out_of_bounds() {
        let v = Vector3::ZERO;
        let _ = v[3];
    }

    #[test]
    fn test_epsilon_equality() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(1.0 + 1e-7, 2.0, 3.0 - 1e-7);
        assert_eq!(a, b);

        let c = Vector3::new(1.0 + 1e-4, 2.0, 3.0);
        assert_ne!(a, c);
    }

    // Test Vector2

    #[test]
    fn test_vector2_arithmetic() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 4.0);
        assert_eq!(a + b, Vector2::new(4.0, 6.0));
        assert_eq!(b - a, Vector2::new(2.0, 2.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(a * b, Vector2::new(3.0, 8.0));
    }

    #[test]
    fn test_vector2_normalize() {
        let mut v = Vector2::new(0.0, 4.0);
        v.normalize();
        assert_eq!(v, Vector2::Y);

        let mut zero = Vector2::ZERO;
        zero.normalize();
        assert_eq!(zero, Vector2::ZERO);
    }

    #[test]
    #[should_panic(expected = "Index out of bounds for Vector2")]
    fn test_vector2_index_out_of_bounds() {
        let v = Vector2::ZERO;
        let _ = v[2];
    }

    // Test Vector4

    #[test]
    fn test_vector4_new() {
        let v = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
        assert_eq!(v.w, 4.0);
    }

    #[test]
    fn test_vector4_from_vector3() {
        let v3 = Vector3::new(1.0, 2.0, 3.0);
        let v4 = Vector4::from_vector3(v3, 4.0);
        assert_eq!(v4, Vector4::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_vector4_truncate() {
        let v4 = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v4.truncate(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_vector4_dot() {
        let a = Vector4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vector4::new(4.0, 3.0, 2.0, 1.0);
        assert!(approx_eq(a.dot(b), 20.0));
    }

    #[test]
    fn test_vector4_normalize_property() {
        let mut v = Vector4::new(1.0, -2.0, 3.0, -4.0);
        v.normalize();
        assert!(approx_eq_eps(v.magnitude(), 1.0, 1e-5));
    }

    #[test]
    #[should_panic(expected = "divide Vector4 by zero")]
    fn test_vector4_div_by_zero_panics() {
        let _ = Vector4::ONE / 0.0;
    }

    #[test]
    fn test_serde_json_field_names() {
        // Scene files store vectors as named fields, not tuples.
        let v = Vector3::new(1.0, 2.5, -3.0);
        let json = serde_json::to_string(&v).expect("vector serializes");
        assert_eq!(json, r#"{"x":1.0,"y":2.5,"z":-3.0}"#);
        let back: Vector3 = serde_json::from_str(&json).expect("vector deserializes");
        assert_eq!(back, v);
    }
}
