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

//! Defines the `Matrix4x4` type and associated operations.
//!
//! The matrix is stored row-major with named fields `m11..m44` (`mRC`, row
//! then column) and follows the row-vector convention: points transform as
//! `v' = v * M`, basis vectors live in the rows, and the translation sits in
//! the fourth row. View and projection builders use the D3DX sign layout for
//! both left- and right-handed variants.

use serde::{Deserialize, Serialize};

use super::{approx_eq, Quaternion, Vector3, Vector4, EPSILON};
use std::fmt;
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

/// A row-major 4x4 transform matrix.
///
/// `Determinant` and `invert` are only meaningful when the homogeneous
/// assumptions of the construction routine used still hold (perspective
/// vs. orthographic vs. general affine); callers are expected to know which
/// flavor of matrix they hold.
#[derive(Debug, Default, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
#[repr(C)]
#[allow(missing_docs)] // the mRC fields follow one documented naming rule
pub struct Matrix4x4 {
    pub m11: f32,
    pub m12: f32,
    pub m13: f32,
    pub m14: f32,
    pub m21: f32,
    pub m22: f32,
    pub m23: f32,
    pub m24: f32,
    pub m31: f32,
    pub m32: f32,
    pub m33: f32,
    pub m34: f32,
    pub m41: f32,
    pub m42: f32,
    pub m43: f32,
    pub m44: f32,
}

impl Matrix4x4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::from_array([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// A matrix with all elements set to `0.0`.
    pub const ZERO: Self = Self::from_array([0.0; 16]);

    /// Creates a matrix from 16 elements in row-major order.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        m11: f32,
        m12: f32,
        m13: f32,
        m14: f32,
        m21: f32,
        m22: f32,
        m23: f32,
        m24: f32,
        m31: f32,
        m32: f32,
        m33: f32,
        m34: f32,
        m41: f32,
        m42: f32,
        m43: f32,
        m44: f32,
    ) -> Self {
        Self {
            m11,
            m12,
            m13,
            m14,
            m21,
            m22,
            m23,
            m24,
            m31,
            m32,
            m33,
            m34,
            m41,
            m42,
            m43,
            m44,
        }
    }

    /// Creates a matrix from a row-major array of 16 elements.
    #[inline]
    pub const fn from_array(m: [f32; 16]) -> Self {
        Self::new(
            m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8], m[9], m[10], m[11], m[12], m[13],
            m[14], m[15],
        )
    }

    /// Creates a matrix from a row-major slice of exactly 16 elements.
    ///
    /// # Panics
    /// Panics if `values.len() != 16`.
    #[inline]
    pub fn from_slice(values: &[f32]) -> Self {
        if values.len() != 16 {
            panic!(
                "Matrix4x4 requires exactly 16 elements, got {}",
                values.len()
            );
        }
        let mut m = [0.0; 16];
        m.copy_from_slice(values);
        Self::from_array(m)
    }

    /// Creates a matrix from four row vectors.
    #[inline]
    pub fn from_rows(r1: Vector4, r2: Vector4, r3: Vector4, r4: Vector4) -> Self {
        Self::from_array([
            r1.x, r1.y, r1.z, r1.w, //
            r2.x, r2.y, r2.z, r2.w, //
            r3.x, r3.y, r3.z, r3.w, //
            r4.x, r4.y, r4.z, r4.w,
        ])
    }

    /// Creates a rotation matrix whose upper 3x3 rows are the given basis
    /// vectors (right, up, forward in the row-vector convention).
    #[inline]
    pub fn from_basis_rows(right: Vector3, up: Vector3, forward: Vector3) -> Self {
        let mut m = Self::IDENTITY;
        m.m11 = right.x;
        m.m12 = right.y;
        m.m13 = right.z;
        m.m21 = up.x;
        m.m22 = up.y;
        m.m23 = up.z;
        m.m31 = forward.x;
        m.m32 = forward.y;
        m.m33 = forward.z;
        m
    }

    /// Returns the elements as a row-major array.
    #[inline]
    pub const fn to_array(&self) -> [f32; 16] {
        [
            self.m11, self.m12, self.m13, self.m14, //
            self.m21, self.m22, self.m23, self.m24, //
            self.m31, self.m32, self.m33, self.m34, //
            self.m41, self.m42, self.m43, self.m44,
        ]
    }

    /// Returns a row of the matrix as a `Vector4`.
    ///
    /// # Panics
    /// Panics if `index` is not between 0 and 3.
    #[inline]
    pub fn row(&self, index: usize) -> Vector4 {
        Vector4::new(
            self[(index, 0)],
            self[(index, 1)],
            self[(index, 2)],
            self[(index, 3)],
        )
    }

    /// Replaces a row of the matrix.
    ///
    /// # Panics
    /// Panics if `index` is not between 0 and 3.
    #[inline]
    pub fn set_row(&mut self, index: usize, row: Vector4) {
        self[(index, 0)] = row.x;
        self[(index, 1)] = row.y;
        self[(index, 2)] = row.z;
        self[(index, 3)] = row.w;
    }

    /// Returns a column of the matrix as a `Vector4`.
    ///
    /// # Panics
    /// Panics if `index` is not between 0 and 3.
    #[inline]
    pub fn column(&self, index: usize) -> Vector4 {
        Vector4::new(
            self[(0, index)],
            self[(1, index)],
            self[(2, index)],
            self[(3, index)],
        )
    }

    /// Swaps two rows in place.
    ///
    /// # Panics
    /// Panics if either index is not between 0 and 3.
    pub fn exchange_rows(&mut self, first: usize, second: usize) {
        if first >= 4 || second >= 4 {
            panic!("Row index out of bounds for Matrix4x4");
        }
        if first == second {
            return;
        }
        let tmp = self.row(first);
        self.set_row(first, self.row(second));
        self.set_row(second, tmp);
    }

    /// Swaps two columns in place.
    ///
    /// # Panics
    /// Panics if either index is not between 0 and 3.
    pub fn exchange_columns(&mut self, first: usize, second: usize) {
        if first >= 4 || second >= 4 {
            panic!("Column index out of bounds for Matrix4x4");
        }
        if first == second {
            return;
        }
        for row in 0..4 {
            let tmp = self[(row, first)];
            self[(row, first)] = self[(row, second)];
            self[(row, second)] = tmp;
        }
    }

    /// Returns the transpose of the matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_array([
            self.m11, self.m21, self.m31, self.m41, //
            self.m12, self.m22, self.m32, self.m42, //
            self.m13, self.m23, self.m33, self.m43, //
            self.m14, self.m24, self.m34, self.m44,
        ])
    }

    /// Determinant of the 3x3 minor obtained by deleting `row` and `col`.
    fn minor(m: &[f32; 16], row: usize, col: usize) -> f32 {
        let mut sub = [0.0f32; 9];
        let mut i = 0;
        for r in 0..4 {
            if r == row {
                continue;
            }
            for c in 0..4 {
                if c == col {
                    continue;
                }
                sub[i] = m[r * 4 + c];
                i += 1;
            }
        }
        sub[0] * (sub[4] * sub[8] - sub[5] * sub[7])
            - sub[1] * (sub[3] * sub[8] - sub[5] * sub[6])
            + sub[2] * (sub[3] * sub[7] - sub[4] * sub[6])
    }

    /// Calculates the determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        let m = self.to_array();
        let mut det = 0.0;
        for c in 0..4 {
            let sign = if c % 2 == 0 { 1.0 } else { -1.0 };
            det += sign * m[c] * Self::minor(&m, 0, c);
        }
        det
    }

    /// Returns the inverse of the matrix (adjugate over determinant).
    ///
    /// When the determinant's magnitude is below [`EPSILON`] the matrix is
    /// singular and [`Matrix4x4::ZERO`] is returned instead of failing;
    /// callers must check for the degenerate result themselves.
    pub fn invert(&self) -> Self {
        let det = self.determinant();
        if det.abs() < EPSILON {
            return Self::ZERO;
        }
        let m = self.to_array();
        let inv_det = 1.0 / det;
        let mut out = [0.0f32; 16];
        for r in 0..4 {
            for c in 0..4 {
                let sign = if (r + c) % 2 == 0 { 1.0 } else { -1.0 };
                // Adjugate: the cofactor lands transposed.
                out[c * 4 + r] = sign * Self::minor(&m, r, c) * inv_det;
            }
        }
        Self::from_array(out)
    }

    /// Component-wise division of two matrices.
    ///
    /// This is **not** an inverse-multiply: each element of `lhs` is simply
    /// divided by the matching element of `rhs`. Preserved as an engine
    /// convention; use `lhs * rhs.invert()` for the algebraic quotient.
    pub fn divide(lhs: &Self, rhs: &Self) -> Self {
        let a = lhs.to_array();
        let b = rhs.to_array();
        let mut out = [0.0f32; 16];
        for i in 0..16 {
            out[i] = a[i] / b[i];
        }
        Self::from_array(out)
    }

    // --- Decomposition ---

    /// Splits the matrix into scale, rotation, and translation.
    ///
    /// Scale is taken from the magnitudes of the upper 3x3 rows, the rows
    /// are then normalized and the rotation extracted from the resulting
    /// rotation matrix. Returns `None` when any scale axis is near zero —
    /// the non-panicking degenerate fallback — rather than failing.
    pub fn decompose(&self) -> Option<(Vector3, Quaternion, Vector3)> {
        let translation = Vector3::new(self.m41, self.m42, self.m43);

        let row_x = Vector3::new(self.m11, self.m12, self.m13);
        let row_y = Vector3::new(self.m21, self.m22, self.m23);
        let row_z = Vector3::new(self.m31, self.m32, self.m33);

        let scale = Vector3::new(row_x.magnitude(), row_y.magnitude(), row_z.magnitude());
        if scale.x < EPSILON || scale.y < EPSILON || scale.z < EPSILON {
            return None;
        }

        let rotation_matrix = Self::from_basis_rows(
            row_x / scale.x, //
            row_y / scale.y,
            row_z / scale.z,
        );
        let rotation = Quaternion::from_rotation_matrix(&rotation_matrix);
        Some((scale, rotation, translation))
    }

    /// Splits the matrix into a uniform scale, rotation, and translation.
    ///
    /// Returns `None` when the matrix is degenerate or the three scale axes
    /// do not agree within [`EPSILON`].
    pub fn decompose_uniform_scale(&self) -> Option<(f32, Quaternion, Vector3)> {
        let (scale, rotation, translation) = self.decompose()?;
        if (scale.x - scale.y).abs() > EPSILON || (scale.x - scale.z).abs() > EPSILON {
            return None;
        }
        Some((scale.x, rotation, translation))
    }

    // --- Orthogonalization ---

    /// Makes the rows mutually orthogonal using classic Gram-Schmidt.
    ///
    /// The rows keep their magnitudes' general scale but lose their
    /// original directions progressively: this procedure is numerically
    /// unstable, and stability decreases from row 1 to row 4. Rows that
    /// collapse to near zero are skipped as projection bases.
    pub fn orthogonalize(&mut self) {
        let mut rows = [self.row(0), self.row(1), self.row(2), self.row(3)];
        for i in 1..4 {
            for j in 0..i {
                let denom = rows[j].dot(rows[j]);
                if denom > EPSILON {
                    let factor = rows[i].dot(rows[j]) / denom;
                    rows[i] = rows[i] - rows[j] * factor;
                }
            }
        }
        for (i, row) in rows.iter().enumerate() {
            self.set_row(i, *row);
        }
    }

    /// Makes the rows orthonormal using modified Gram-Schmidt.
    ///
    /// Like [`Matrix4x4::orthogonalize`], but each row is normalized as it
    /// is produced and later rows project against the already-normalized
    /// ones. Numerically unstable; stability decreases from row 1 to row 4.
    pub fn orthonormalize(&mut self) {
        let mut rows = [self.row(0), self.row(1), self.row(2), self.row(3)];
        for i in 0..4 {
            for j in 0..i {
                let factor = rows[i].dot(rows[j]);
                rows[i] = rows[i] - rows[j] * factor;
            }
            rows[i].normalize();
        }
        for (i, row) in rows.iter().enumerate() {
            self.set_row(i, *row);
        }
    }

    // --- Row Reduction ---

    /// Finds the first row at or below `from_row` with a usable (non
    /// near-zero) pivot in `col`.
    fn find_pivot(&self, col: usize, from_row: usize) -> Option<usize> {
        (from_row..4).find(|&r| self[(r, col)].abs() > EPSILON)
    }

    /// Reduces the matrix to an upper triangular form by Gaussian
    /// elimination.
    ///
    /// Pivots are selected by scanning down the lead column from the
    /// current row for the first non-near-zero entry; if the column is
    /// exhausted the lead column advances. This pivot rule is part of the
    /// contract: degenerate inputs reduce deterministically.
    pub fn upper_triangular_form(&self) -> Self {
        let mut result = *self;
        let mut lead = 0;
        for row in 0..4 {
            let pivot_row = loop {
                if lead >= 4 {
                    return result;
                }
                match result.find_pivot(lead, row) {
                    Some(p) => break p,
                    None => lead += 1,
                }
            };
            if pivot_row != row {
                result.exchange_rows(row, pivot_row);
            }
            let pivot = result[(row, lead)];
            for r in (row + 1)..4 {
                let factor = result[(r, lead)] / pivot;
                if factor != 0.0 {
                    for c in 0..4 {
                        result[(r, c)] -= factor * result[(row, c)];
                    }
                }
            }
            lead += 1;
        }
        result
    }

    /// Reduces the matrix to a lower triangular form.
    ///
    /// Implemented as the transpose of the upper triangular form of the
    /// transpose, so it shares the same pivot rule.
    pub fn lower_triangular_form(&self) -> Self {
        self.transpose().upper_triangular_form().transpose()
    }

    /// Reduces the matrix to row echelon form (leading 1s, zeros below).
    ///
    /// Shares the pivot-selection rule of
    /// [`Matrix4x4::upper_triangular_form`].
    pub fn row_echelon_form(&self) -> Self {
        let mut result = *self;
        let mut lead = 0;
        for row in 0..4 {
            let pivot_row = loop {
                if lead >= 4 {
                    return result;
                }
                match result.find_pivot(lead, row) {
                    Some(p) => break p,
                    None => lead += 1,
                }
            };
            if pivot_row != row {
                result.exchange_rows(row, pivot_row);
            }
            let pivot = result[(row, lead)];
            for c in 0..4 {
                result[(row, c)] /= pivot;
            }
            for r in (row + 1)..4 {
                let factor = result[(r, lead)];
                if factor != 0.0 {
                    for c in 0..4 {
                        result[(r, c)] -= factor * result[(row, c)];
                    }
                }
            }
            lead += 1;
        }
        result
    }

    /// Reduces the matrix to reduced row echelon form (Gauss-Jordan).
    ///
    /// Shares the pivot-selection rule of
    /// [`Matrix4x4::upper_triangular_form`]; eliminates above as well as
    /// below each pivot.
    pub fn reduced_row_echelon_form(&self) -> Self {
        let mut result = *self;
        let mut lead = 0;
        for row in 0..4 {
            let pivot_row = loop {
                if lead >= 4 {
                    return result;
                }
                match result.find_pivot(lead, row) {
                    Some(p) => break p,
                    None => lead += 1,
                }
            };
            if pivot_row != row {
                result.exchange_rows(row, pivot_row);
            }
            let pivot = result[(row, lead)];
            for c in 0..4 {
                result[(row, c)] /= pivot;
            }
            for r in 0..4 {
                if r == row {
                    continue;
                }
                let factor = result[(r, lead)];
                if factor != 0.0 {
                    for c in 0..4 {
                        result[(r, c)] -= factor * result[(row, c)];
                    }
                }
            }
            lead += 1;
        }
        result
    }

    // --- Affine Builders ---

    /// Creates a translation matrix (translation in the fourth row).
    #[inline]
    pub fn translation(translation: Vector3) -> Self {
        let mut m = Self::IDENTITY;
        m.m41 = translation.x;
        m.m42 = translation.y;
        m.m43 = translation.z;
        m
    }

    /// Creates a scaling matrix.
    #[inline]
    pub fn scaling(scale: Vector3) -> Self {
        let mut m = Self::IDENTITY;
        m.m11 = scale.x;
        m.m22 = scale.y;
        m.m33 = scale.z;
        m
    }

    /// Creates a matrix for a rotation around the X-axis.
    ///
    /// # Arguments
    ///
    /// * `angle_radians`: The angle of rotation in radians.
    #[inline]
    pub fn rotation_x(angle_radians: f32) -> Self {
        let (s, c) = angle_radians.sin_cos();
        let mut m = Self::IDENTITY;
        m.m22 = c;
        m.m23 = s;
        m.m32 = -s;
        m.m33 = c;
        m
    }

    /// Creates a matrix for a rotation around the Y-axis.
    ///
    /// # Arguments
    ///
    /// * `angle_radians`: The angle of rotation in radians.
    #[inline]
    pub fn rotation_y(angle_radians: f32) -> Self {
        let (s, c) = angle_radians.sin_cos();
        let mut m = Self::IDENTITY;
        m.m11 = c;
        m.m13 = -s;
        m.m31 = s;
        m.m33 = c;
        m
    }

    /// Creates a matrix for a rotation around the Z-axis.
    ///
    /// # Arguments
    ///
    /// * `angle_radians`: The angle of rotation in radians.
    #[inline]
    pub fn rotation_z(angle_radians: f32) -> Self {
        let (s, c) = angle_radians.sin_cos();
        let mut m = Self::IDENTITY;
        m.m11 = c;
        m.m12 = s;
        m.m21 = -s;
        m.m22 = c;
        m
    }

    /// Creates a rotation matrix from a quaternion.
    ///
    /// Row-vector convention: `v * M` equals `q * v` for the same rotation.
    pub fn rotation_quaternion(q: &Quaternion) -> Self {
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let mut m = Self::IDENTITY;
        m.m11 = 1.0 - 2.0 * (y * y + z * z);
        m.m12 = 2.0 * (x * y + z * w);
        m.m13 = 2.0 * (x * z - y * w);
        m.m21 = 2.0 * (x * y - z * w);
        m.m22 = 1.0 - 2.0 * (x * x + z * z);
        m.m23 = 2.0 * (y * z + x * w);
        m.m31 = 2.0 * (x * z + y * w);
        m.m32 = 2.0 * (y * z - x * w);
        m.m33 = 1.0 - 2.0 * (x * x + y * y);
        m
    }

    /// Composes a world matrix from scale, rotation, and translation.
    ///
    /// Row-vector order: `S * R * T` — scale applies first, translation
    /// last, the inverse of [`Matrix4x4::decompose`].
    #[inline]
    pub fn trs(position: Vector3, rotation: &Quaternion, scale: Vector3) -> Self {
        Self::scaling(scale) * Self::rotation_quaternion(rotation) * Self::translation(position)
    }

    // --- View / Projection Builders ---

    /// Creates a left-handed look-at view matrix.
    pub fn look_at_lh(eye: Vector3, target: Vector3, up: Vector3) -> Self {
        let z_axis = (target - eye).normalized();
        let x_axis = up.cross(z_axis).normalized();
        let y_axis = z_axis.cross(x_axis);
        Self::from_array([
            x_axis.x,
            y_axis.x,
            z_axis.x,
            0.0,
            x_axis.y,
            y_axis.y,
            z_axis.y,
            0.0,
            x_axis.z,
            y_axis.z,
            z_axis.z,
            0.0,
            -x_axis.dot(eye),
            -y_axis.dot(eye),
            -z_axis.dot(eye),
            1.0,
        ])
    }

    /// Creates a right-handed look-at view matrix.
    pub fn look_at_rh(eye: Vector3, target: Vector3, up: Vector3) -> Self {
        let z_axis = (eye - target).normalized();
        let x_axis = up.cross(z_axis).normalized();
        let y_axis = z_axis.cross(x_axis);
        Self::from_array([
            x_axis.x,
            y_axis.x,
            z_axis.x,
            0.0,
            x_axis.y,
            y_axis.y,
            z_axis.y,
            0.0,
            x_axis.z,
            y_axis.z,
            z_axis.z,
            0.0,
            -x_axis.dot(eye),
            -y_axis.dot(eye),
            -z_axis.dot(eye),
            1.0,
        ])
    }

    /// Creates a left-handed perspective projection from a vertical field
    /// of view.
    ///
    /// Maps view-space depth `[znear, zfar]` to NDC `[0, 1]` with the D3DX
    /// sign layout (`1` in `m34`, `-q * znear` in `m43`).
    pub fn perspective_fov_lh(fov_y_radians: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let y_scale = 1.0 / (fov_y_radians * 0.5).tan();
        let q = zfar / (zfar - znear);
        let mut m = Self::ZERO;
        m.m11 = y_scale / aspect;
        m.m22 = y_scale;
        m.m33 = q;
        m.m34 = 1.0;
        m.m43 = -q * znear;
        m
    }

    /// Creates a right-handed perspective projection from a vertical field
    /// of view.
    pub fn perspective_fov_rh(fov_y_radians: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let y_scale = 1.0 / (fov_y_radians * 0.5).tan();
        let q = zfar / (znear - zfar);
        let mut m = Self::ZERO;
        m.m11 = y_scale / aspect;
        m.m22 = y_scale;
        m.m33 = q;
        m.m34 = -1.0;
        m.m43 = q * znear;
        m
    }

    /// Creates a left-handed perspective projection from an off-center
    /// view volume.
    pub fn perspective_off_center_lh(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        let mut m = Self::ZERO;
        m.m11 = 2.0 * znear / (right - left);
        m.m22 = 2.0 * znear / (top - bottom);
        m.m31 = (left + right) / (left - right);
        m.m32 = (top + bottom) / (bottom - top);
        m.m33 = zfar / (zfar - znear);
        m.m34 = 1.0;
        m.m43 = znear * zfar / (znear - zfar);
        m
    }

    /// Creates a right-handed perspective projection from an off-center
    /// view volume.
    pub fn perspective_off_center_rh(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        let mut m = Self::ZERO;
        m.m11 = 2.0 * znear / (right - left);
        m.m22 = 2.0 * znear / (top - bottom);
        m.m31 = (left + right) / (right - left);
        m.m32 = (top + bottom) / (top - bottom);
        m.m33 = zfar / (znear - zfar);
        m.m34 = -1.0;
        m.m43 = znear * zfar / (znear - zfar);
        m
    }

    /// Creates a left-handed orthographic projection from an off-center
    /// view volume.
    pub fn ortho_off_center_lh(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        let mut m = Self::IDENTITY;
        m.m11 = 2.0 / (right - left);
        m.m22 = 2.0 / (top - bottom);
        m.m33 = 1.0 / (zfar - znear);
        m.m41 = (left + right) / (left - right);
        m.m42 = (top + bottom) / (bottom - top);
        m.m43 = znear / (znear - zfar);
        m
    }

    /// Creates a right-handed orthographic projection from an off-center
    /// view volume.
    pub fn ortho_off_center_rh(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        let mut m = Self::IDENTITY;
        m.m11 = 2.0 / (right - left);
        m.m22 = 2.0 / (top - bottom);
        m.m33 = 1.0 / (znear - zfar);
        m.m41 = (left + right) / (left - right);
        m.m42 = (top + bottom) / (bottom - top);
        m.m43 = znear / (znear - zfar);
        m
    }

    // --- Point / Direction Transforms ---

    /// Transforms a point by this matrix, performing the perspective
    /// divide.
    ///
    /// The point is promoted to `(x, y, z, 1)`, multiplied as a row vector,
    /// and divided by the resulting `w` (skipped when `w` is near zero).
    pub fn transform_coordinate(&self, point: Vector3) -> Vector3 {
        let v = Vector4::from_vector3(point, 1.0) * *self;
        if v.w.abs() > EPSILON {
            Vector3::new(v.x / v.w, v.y / v.w, v.z / v.w)
        } else {
            v.truncate()
        }
    }

    /// Transforms a direction by this matrix, ignoring translation.
    ///
    /// The direction is promoted to `(x, y, z, 0)` and multiplied as a row
    /// vector; no perspective divide is performed.
    #[inline]
    pub fn transform_vector(&self, direction: Vector3) -> Vector3 {
        (Vector4::from_vector3(direction, 0.0) * *self).truncate()
    }

    // --- Misc ---

    /// Raises the matrix to a non-negative integer power by repeated
    /// squaring.
    ///
    /// `exponent(0)` is [`Matrix4x4::IDENTITY`]. Negative exponents are
    /// unrepresentable by the parameter type; invert first if needed.
    pub fn exponent(&self, n: u32) -> Self {
        let mut result = Self::IDENTITY;
        let mut base = *self;
        let mut n = n;
        while n > 0 {
            if n & 1 == 1 {
                result = result * base;
            }
            base = base * base;
            n >>= 1;
        }
        result
    }

    /// Performs a component-wise linear interpolation between two matrices.
    /// The interpolation factor `t` is clamped to the `[0.0, 1.0]` range.
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let a = start.to_array();
        let b = end.to_array();
        let mut out = [0.0f32; 16];
        for i in 0..16 {
            out[i] = a[i] + (b[i] - a[i]) * t;
        }
        Self::from_array(out)
    }
}

// --- Operator Overloads ---

impl Add for Matrix4x4 {
    type Output = Self;
    /// Adds two matrices component-wise.
    fn add(self, rhs: Self) -> Self::Output {
        let a = self.to_array();
        let b = rhs.to_array();
        let mut out = [0.0f32; 16];
        for i in 0..16 {
            out[i] = a[i] + b[i];
        }
        Self::from_array(out)
    }
}

impl Sub for Matrix4x4 {
    type Output = Self;
    /// Subtracts two matrices component-wise.
    fn sub(self, rhs: Self) -> Self::Output {
        let a = self.to_array();
        let b = rhs.to_array();
        let mut out = [0.0f32; 16];
        for i in 0..16 {
            out[i] = a[i] - b[i];
        }
        Self::from_array(out)
    }
}

impl Mul<f32> for Matrix4x4 {
    type Output = Self;
    /// Multiplies every element by a scalar.
    fn mul(self, rhs: f32) -> Self::Output {
        let a = self.to_array();
        let mut out = [0.0f32; 16];
        for i in 0..16 {
            out[i] = a[i] * rhs;
        }
        Self::from_array(out)
    }
}

impl Div<f32> for Matrix4x4 {
    type Output = Self;
    /// Divides every element by a scalar.
    fn div(self, rhs: f32) -> Self::Output {
        let a = self.to_array();
        let mut out = [0.0f32; 16];
        for i in 0..16 {
            out[i] = a[i] / rhs;
        }
        Self::from_array(out)
    }
}

impl Neg for Matrix4x4 {
    type Output = Self;
    /// Negates every element.
    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl Mul for Matrix4x4 {
    type Output = Self;
    /// Multiplies two matrices (row-by-column dot products).
    fn mul(self, rhs: Self) -> Self::Output {
        let mut out = Self::ZERO;
        for r in 0..4 {
            for c in 0..4 {
                out[(r, c)] = self.row(r).dot(rhs.column(c));
            }
        }
        out
    }
}

impl Mul<Matrix4x4> for Vector4 {
    type Output = Vector4;
    /// Transforms a row vector by a matrix (`v' = v * M`).
    #[inline]
    fn mul(self, rhs: Matrix4x4) -> Self::Output {
        Vector4::new(
            self.dot(rhs.column(0)),
            self.dot(rhs.column(1)),
            self.dot(rhs.column(2)),
            self.dot(rhs.column(3)),
        )
    }
}

impl Index<(usize, usize)> for Matrix4x4 {
    type Output = f32;
    /// Accesses an element by `(row, col)`.
    /// # Panics
    /// Panics if either index is not between 0 and 3.
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        match (row, col) {
            (0, 0) => &self.m11,
            (0, 1) => &self.m12,
            (0, 2) => &self.m13,
            (0, 3) => &self.m14,
            (1, 0) => &self.m21,
            (1, 1) => &self.m22,
            (1, 2) => &self.m23,
            (1, 3) => &self.m24,
            (2, 0) => &self.m31,
            (2, 1) => &self.m32,
            (2, 2) => &self.m33,
            (2, 3) => &self.m34,
            (3, 0) => &self.m41,
            (3, 1) => &self.m42,
            (3, 2) => &self.m43,
            (3, 3) => &self.m44,
            _ => panic!("Index out of bounds for Matrix4x4"),
        }
    }
}

impl IndexMut<(usize, usize)> for Matrix4x4 {
    /// Mutably accesses an element by `(row, col)`.
    /// # Panics
    /// Panics if either index is not between 0 and 3.
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        match (row, col) {
            (0, 0) => &mut self.m11,
            (0, 1) => &mut self.m12,
            (0, 2) => &mut self.m13,
            (0, 3) => &mut self.m14,
            (1, 0) => &mut self.m21,
            (1, 1) => &mut self.m22,
            (1, 2) => &mut self.m23,
            (1, 3) => &mut self.m24,
            (2, 0) => &mut self.m31,
            (2, 1) => &mut self.m32,
            (2, 2) => &mut self.m33,
            (2, 3) => &mut self.m34,
            (3, 0) => &mut self.m41,
            (3, 1) => &mut self.m42,
            (3, 2) => &mut self.m43,
            (3, 3) => &mut self.m44,
            _ => panic!("Index out of bounds for Matrix4x4"),
        }
    }
}

impl Index<usize> for Matrix4x4 {
    type Output = f32;
    /// Accesses an element by flat row-major index (0..15).
    /// # Panics
    /// Panics if `index` is not between 0 and 15.
    fn index(&self, index: usize) -> &Self::Output {
        if index >= 16 {
            panic!("Index out of bounds for Matrix4x4");
        }
        &self[(index / 4, index % 4)]
    }
}

impl IndexMut<usize> for Matrix4x4 {
    /// Mutably accesses an element by flat row-major index (0..15).
    /// # Panics
    /// Panics if `index` is not between 0 and 15.
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        if index >= 16 {
            panic!("Index out of bounds for Matrix4x4");
        }
        &mut self[(index / 4, index % 4)]
    }
}

/// Component-wise equality within [`EPSILON`].
impl PartialEq for Matrix4x4 {
    fn eq(&self, other: &Self) -> bool {
        let a = self.to_array();
        let b = other.to_array();
        a.iter().zip(b.iter()).all(|(x, y)| approx_eq(*x, *y))
    }
}

impl fmt::Display for Matrix4x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}, {}, {}, {}]", self.m11, self.m12, self.m13, self.m14)?;
        writeln!(f, "[{}, {}, {}, {}]", self.m21, self.m22, self.m23, self.m24)?;
        writeln!(f, "[{}, {}, {}, {}]", self.m31, self.m32, self.m33, self.m34)?;
        write!(f, "[{}, {}, {}, {}]", self.m41, self.m42, self.m43, self.m44)
    }
}

// --- Tests ---
