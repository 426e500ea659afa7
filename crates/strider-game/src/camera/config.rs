//! Follow-camera tuning constants

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Follow camera configuration.
///
/// Offsets are in the character's local space with forward along negative
/// Z, so a positive Z position offset trails behind the character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowConfig {
    /// Camera position offset from the character
    pub position_offset: Vec3,
    /// Aim point offset from the character
    pub look_offset: Vec3,
    /// Per-frame lerp factor for the camera's vertical motion
    pub height_smoothing: f32,
    /// Vertical starting point for the smoothed height
    pub initial_height: f32,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            position_offset: Vec3::new(0.0, 6.0, 15.0),
            look_offset: Vec3::new(0.0, 1.0, -2.0),
            height_smoothing: 0.02,
            initial_height: 15.0,
        }
    }
}
