//! Camera module
//!
//! Chase camera that trails the character: rigid in the horizontal plane,
//! low-pass filtered vertically, toggleable back to a host-driven camera.

mod config;
mod rig;

pub use config::FollowConfig;
pub use rig::{CameraPose, FollowRig};
