//! Strider Game - Per-frame character simulation
//!
//! Converts a per-frame input snapshot into a character pose, a locomotion
//! intent, a playing animation clip, and a chase-camera pose. One
//! frame-step call drives everything; see [`locomotion::LocomotionResolver`].

pub mod animation;
pub mod camera;
pub mod input;
pub mod locomotion;

pub use animation::{AnimationPlayback, AnimationSet, AnimationStateMachine, ClipToken};
pub use camera::{CameraPose, FollowConfig, FollowRig};
pub use input::{InputAction, InputState};
pub use locomotion::{
    AirState, CharacterState, ConfigError, LocomotionConfig, LocomotionIntent, LocomotionResolver,
    UngatedPolicy,
};
