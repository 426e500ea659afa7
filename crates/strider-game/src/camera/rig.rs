//! Chase-camera rig
//!
//! Tracks the character rigidly in X/Z and eases toward it in Y, which
//! keeps jumps and platform rides from yanking the horizon around.

use glam::Vec3;
use strider_core::Transform;

use crate::input::{InputAction, InputState};

use super::config::FollowConfig;

/// Where the host should place and aim its camera this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Follow camera state.
///
/// While following, [`update`](Self::update) yields a pose each frame;
/// while toggled off it yields `None` and the host's own camera takes
/// over. The smoothed height persists across toggles, so re-enabling eases
/// from where the rig left off instead of snapping.
#[derive(Debug)]
pub struct FollowRig {
    config: FollowConfig,
    follow_enabled: bool,
    smoothed_y: f32,
}

impl FollowRig {
    pub fn new(config: FollowConfig) -> Self {
        let smoothed_y = config.initial_height;
        Self {
            config,
            follow_enabled: true,
            smoothed_y,
        }
    }

    pub fn is_following(&self) -> bool {
        self.follow_enabled
    }

    /// Flip follow mode on the toggle action's press edge
    pub fn handle_input(&mut self, input: &InputState) {
        if input.is_just_pressed(InputAction::CameraFollow) {
            self.follow_enabled = !self.follow_enabled;
        }
    }

    /// Compute this frame's camera pose for the given character transform
    pub fn update(&mut self, target: &Transform) -> Option<CameraPose> {
        if !self.follow_enabled {
            return None;
        }

        let desired = target.position + target.rotation * self.config.position_offset;
        self.smoothed_y += (desired.y - self.smoothed_y) * self.config.height_smoothing;
        let look_at = target.position + target.rotation * self.config.look_offset;

        Some(CameraPose {
            position: Vec3::new(desired.x, self.smoothed_y, desired.z),
            look_at,
        })
    }
}
