//! World transform for characters and cameras

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// World transform: position plus orientation.
///
/// Forward is local negative Z; yaw rotations go about world up (+Y).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a transform at the given position with identity rotation
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Compute the model matrix for this transform
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the right direction (positive X in local space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction (positive Y in local space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Translate by the given world-space offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Translate along a local-space axis by the given distance
    pub fn translate_on_axis(&mut self, axis: Vec3, distance: f32) {
        self.position += (self.rotation * axis) * distance;
    }

    /// Rotate about world up (+Y) by the given angle in radians
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_y(angle) * self.rotation;
    }

    /// Interpolate between two transforms
    pub fn lerp(a: &Transform, b: &Transform, t: f32) -> Transform {
        Transform {
            position: a.position.lerp(b.position, t),
            rotation: a.rotation.slerp(b.rotation, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_basis() {
        let transform = Transform::default();
        assert_eq!(transform.forward(), -Vec3::Z);
        assert_eq!(transform.right(), Vec3::X);
        assert_eq!(transform.up(), Vec3::Y);
    }

    #[test]
    fn test_rotate_y_turns_forward() {
        let mut transform = Transform::default();
        transform.rotate_y(std::f32::consts::FRAC_PI_2);
        let forward = transform.forward();
        // Quarter turn to the left swings forward from -Z to -X
        assert!((forward.x - -1.0).abs() < 1e-5);
        assert!(forward.z.abs() < 1e-5);
    }

    #[test]
    fn test_translate_on_axis_uses_local_space() {
        let mut transform = Transform::default();
        transform.rotate_y(std::f32::consts::FRAC_PI_2);
        transform.translate_on_axis(-Vec3::Z, 2.0);
        assert!((transform.position.x - -2.0).abs() < 1e-5);
        assert!(transform.position.z.abs() < 1e-5);
    }

    #[test]
    fn test_matrix_translation() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let translation = transform.matrix().col(3).truncate();
        assert_eq!(translation, Vec3::new(1.0, 2.0, 3.0));
    }
}
