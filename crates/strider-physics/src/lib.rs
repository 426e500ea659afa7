//! Strider Physics - Ray-probe collision queries for kinematic characters
//!
//! No rigid-body dynamics run here. The world is a tagged collection of
//! colliders that answers single ray queries; everything the controller
//! knows about geometry flows through [`WorldQuery::cast_ray`].

mod ground;
mod rays;
mod world;

pub use ground::{
    admissible, penetration_correction, platform_ride_position, slope_angle, CharacterDimensions,
    GateConfig,
};
pub use rays::{
    horizontal_fan, slope_ray_direction, vertical_fan, RayPatternError, VerticalRay,
    DEFAULT_SLOPE_RAY_ANGLE, DEFAULT_SLOPE_RAY_RANGE,
};
pub use world::{platform_oscillation, CollisionWorld, Layer, ObjectId, ObjectTag, ProbeHit, WorldQuery};
