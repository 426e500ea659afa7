//! Strider Core - Foundational types for the Strider character controller
//!
//! Provides the world transform the controller mutates each frame and
//! re-exports the math primitives used throughout the workspace.

pub mod types;

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use types::Transform;
