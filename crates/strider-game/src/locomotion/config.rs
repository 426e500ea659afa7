//! Movement tuning constants and their setup-time validation

use serde::{Deserialize, Serialize};
use strider_physics::{GateConfig, RayPatternError};
use thiserror::Error;

/// Setup-time configuration error.
///
/// Reported once when the resolver is constructed; per-frame code assumes
/// a validated config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    RayPattern(#[from] RayPatternError),
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}

/// What the resolver does while character dimensions are still unknown
/// (model geometry not yet loaded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UngatedPolicy {
    /// Translate freely without collision gating
    #[default]
    FreeMove,
    /// Hold in place until geometry resolves
    Hold,
}

/// Movement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocomotionConfig {
    /// Gravity magnitude in meters per second squared
    pub gravity: f32,
    /// Vertical velocity set on a jump edge
    pub jump_impulse: f32,
    /// Forward speed in meters per second
    pub run_speed: f32,
    /// Backward speed in meters per second
    pub walk_speed: f32,
    /// Dash speed during a roll
    pub roll_speed: f32,
    /// Yaw rate in radians per second
    pub turn_speed: f32,
    /// Range of the overhead obstruction probe
    pub overhead_probe_range: f32,
    /// Range of the near-ground feet probe used while moving airborne
    pub ground_snap_range: f32,
    /// Fan shape and slope limits for the admissibility gate
    pub gate: GateConfig,
    /// Behavior before character dimensions are known
    pub ungated_policy: UngatedPolicy,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            jump_impulse: 5.0,
            run_speed: 4.0,
            walk_speed: 2.0,
            roll_speed: 8.0,
            turn_speed: 2.5,
            overhead_probe_range: 0.5,
            ground_snap_range: 0.5,
            gate: GateConfig::default(),
            ungated_policy: UngatedPolicy::default(),
        }
    }
}

impl LocomotionConfig {
    /// Validate once at setup
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gate.validate()?;
        for (name, value) in [
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("run_speed", self.run_speed),
            ("walk_speed", self.walk_speed),
            ("roll_speed", self.roll_speed),
            ("turn_speed", self.turn_speed),
            ("overhead_probe_range", self.overhead_probe_range),
            ("ground_snap_range", self.ground_snap_range),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}
