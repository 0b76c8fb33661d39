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

//! Defines the local placement state every game object carries.

use serde::{Deserialize, Serialize};
use vesper_core::math::{Matrix4x4, Quaternion, Vector3};

/// A game object's local position, rotation, and scale.
///
/// Exactly one transform exists per game object, created with it and never
/// detached. Rotation is stored as Euler angles in degrees, the editor's
/// native representation; [`Transform::local_rotation`] derives the
/// quaternion view on demand.
///
/// The transform holds no hierarchy links: parent and root relations live
/// in the [`crate::SceneGraph`] arena, which derives world placement via
/// [`crate::SceneGraph::world_matrix`]. Keeping linkage in one place means
/// reparenting can never desynchronize an object from its transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position relative to the parent (or the world, for roots).
    pub local_position: Vector3,
    /// Rotation relative to the parent, as Euler angles in degrees.
    pub local_euler_angles: Vector3,
    /// Scale relative to the parent.
    pub local_scale: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            local_position: Vector3::ZERO,
            local_euler_angles: Vector3::ZERO,
            local_scale: Vector3::ONE,
        }
    }
}

impl Transform {
    /// Creates a transform at the origin with no rotation and unit scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// The local rotation as a quaternion, derived from the Euler state.
    pub fn local_rotation(&self) -> Quaternion {
        Quaternion::from_euler(
            self.local_euler_angles.x,
            self.local_euler_angles.y,
            self.local_euler_angles.z,
        )
    }

    /// Sets the local rotation from a quaternion, writing the Euler state
    /// back through [`Quaternion::to_euler`].
    pub fn set_local_rotation(&mut self, rotation: &Quaternion) {
        self.local_euler_angles = rotation.to_euler();
    }

    /// The local transform matrix, composed scale-rotation-translation in
    /// row-vector order.
    pub fn local_matrix(&self) -> Matrix4x4 {
        Matrix4x4::trs(self.local_position, &self.local_rotation(), self.local_scale)
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_core::math::approx_eq_eps;

    #[test]
    fn test_default_is_identity_placement() {
        let transform = Transform::default();
        assert_eq!(transform.local_matrix(), Matrix4x4::IDENTITY);
    }

    #[test]
    fn test_rotation_round_trip() {
        let mut transform = Transform::default();
        let rotation = Quaternion::from_euler(10.0, 20.0, 30.0);
        transform.set_local_rotation(&rotation);

        let restored = transform.local_rotation();
        // Same rotation up to quaternion double cover.
        let dot = Quaternion::dot(rotation, restored).abs();
        assert!(approx_eq_eps(dot, 1.0, 1e-4));
    }

    #[test]
    fn test_local_matrix_applies_position() {
        let transform = Transform {
            local_position: Vector3::new(5.0, 0.0, 0.0),
            ..Transform::default()
        };
        let moved = transform.local_matrix().transform_coordinate(Vector3::ZERO);
        assert_eq!(moved, Vector3::new(5.0, 0.0, 0.0));
    }
}
