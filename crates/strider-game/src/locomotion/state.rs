//! Character state: transform, vertical motion, and locomotion intent

use serde::{Deserialize, Serialize};
use strider_core::Transform;

/// The single semantic movement state active in a frame.
///
/// Drives both physics special-casing and animation selection. `Roll`,
/// `Attack1` and `Attack2` are one-shot intents: they persist until their
/// clip completes, then expire back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LocomotionIntent {
    #[default]
    Idle,
    Walk,
    Run,
    Jump,
    Fall,
    Roll,
    Attack1,
    Attack2,
}

impl LocomotionIntent {
    /// Whether this intent expires via clip completion rather than input
    pub fn is_one_shot(self) -> bool {
        matches!(self, Self::Roll | Self::Attack1 | Self::Attack2)
    }
}

/// Vertical contact state; the three cases are mutually exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AirState {
    /// Standing on geometry
    #[default]
    Grounded,
    /// Tracking a jump's ascent and descent until a ground hit clears it
    Jumping,
    /// Airborne without a jump in flight
    Falling,
}

impl AirState {
    pub fn is_grounded(self) -> bool {
        matches!(self, Self::Grounded)
    }

    pub fn is_airborne(self) -> bool {
        !self.is_grounded()
    }
}

/// Full per-character state, mutated exactly once per frame by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CharacterState {
    /// World transform (position + orientation)
    pub transform: Transform,
    /// Signed vertical velocity; gravity accumulates here
    pub vertical_velocity: f32,
    /// Ground contact state
    pub air: AirState,
    /// Active locomotion intent
    pub intent: LocomotionIntent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_intents() {
        assert!(LocomotionIntent::Roll.is_one_shot());
        assert!(LocomotionIntent::Attack1.is_one_shot());
        assert!(LocomotionIntent::Attack2.is_one_shot());
        assert!(!LocomotionIntent::Jump.is_one_shot());
        assert!(!LocomotionIntent::Run.is_one_shot());
    }

    #[test]
    fn test_air_state_predicates() {
        assert!(AirState::Grounded.is_grounded());
        assert!(AirState::Jumping.is_airborne());
        assert!(AirState::Falling.is_airborne());
    }
}
