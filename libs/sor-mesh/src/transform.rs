//! # Model Transform
//!
//! Rotation, scale and translation applied by the consumer when drawing a
//! mesh. Transforms never change mesh topology, so a slider that only moves
//! the model does not trigger a rebuild.

use config::constants::DEFAULT_TRANSLATION;
use glam::{DMat3, DMat4, DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

/// Model transform: scale first, then rotate about X, Y, Z, then translate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Rotation about the X, Y and Z axes, in degrees.
    pub rotation_degrees: DVec3,
    /// Translation applied last.
    pub translation: DVec3,
    /// Per-axis scale applied first.
    pub scale: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            rotation_degrees: DVec3::ZERO,
            translation: DVec3::from_array(DEFAULT_TRANSLATION),
            scale: DVec3::ONE,
        }
    }
}

impl Transform {
    /// The identity transform (no rotation, translation or scaling).
    pub const IDENTITY: Self = Self {
        rotation_degrees: DVec3::ZERO,
        translation: DVec3::ZERO,
        scale: DVec3::ONE,
    };

    /// Rotation as a quaternion, applied X first, then Y, then Z.
    pub fn rotation(&self) -> DQuat {
        let r = self.rotation_degrees;
        DQuat::from_euler(
            EulerRot::ZYX,
            r.z.to_radians(),
            r.y.to_radians(),
            r.x.to_radians(),
        )
    }

    /// Model matrix `T * R * S`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sor_mesh::transform::Transform;
    /// use glam::DVec3;
    ///
    /// let t = Transform {
    ///     translation: DVec3::new(0.0, 0.0, -5.0),
    ///     scale: DVec3::splat(2.0),
    ///     ..Transform::IDENTITY
    /// };
    /// let p = t.model_matrix().transform_point3(DVec3::X);
    /// assert_eq!(p, DVec3::new(2.0, 0.0, -5.0));
    /// ```
    pub fn model_matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.rotation(), self.translation)
    }

    /// Matrix for transforming normals: the inverse transpose of the model
    /// matrix's upper 3x3.
    pub fn normal_matrix(&self) -> DMat3 {
        DMat3::from_mat4(self.model_matrix()).inverse().transpose()
    }

    /// Returns false if any component is non-finite or a scale is zero, in
    /// which case the normal matrix does not exist.
    pub fn is_invertible(&self) -> bool {
        self.rotation_degrees.is_finite()
            && self.translation.is_finite()
            && self.scale.is_finite()
            && self.scale.x != 0.0
            && self.scale.y != 0.0
            && self.scale.z != 0.0
    }
}
