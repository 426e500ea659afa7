//! Locomotion module
//!
//! Per-frame movement decisions: probe-gated translation, gravity, jumps,
//! one-shot action intents, and the character state they mutate.

mod config;
mod resolver;
mod state;

pub use config::{ConfigError, LocomotionConfig, UngatedPolicy};
pub use resolver::LocomotionResolver;
pub use state::{AirState, CharacterState, LocomotionIntent};
