//! Fan-shaped probe direction generators
//!
//! Obstruction sampling never relies on a single ray: a semicircular fan
//! sweeps for walls at body height, a vertical fan samples the silhouette
//! from feet to head, and one tilted reference ray feeds the slope gate.

use glam::{Quat, Vec3};
use thiserror::Error;

/// Default downward tilt of the slope reference ray, in degrees
pub const DEFAULT_SLOPE_RAY_ANGLE: f32 = 45.0;
/// Default range of the slope reference ray
pub const DEFAULT_SLOPE_RAY_RANGE: f32 = 5.0;

/// Setup-time configuration error for ray fans
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RayPatternError {
    /// A fan's step angle divides by `count - 1`; fewer than two rays is degenerate
    #[error("a ray fan needs at least 2 rays, got {0}")]
    DegenerateFan(usize),
}

/// A forward probe ray with a vertical origin offset
#[derive(Debug, Clone, Copy)]
pub struct VerticalRay {
    pub direction: Vec3,
    pub height_offset: f32,
}

/// Generate `count` directions spanning `arc_degrees` centered on `forward`,
/// rotated about world up.
///
/// The sweep runs from `-arc/2` to `+arc/2` in equal steps, endpoints
/// included.
pub fn horizontal_fan(
    forward: Vec3,
    count: usize,
    arc_degrees: f32,
) -> Result<Vec<Vec3>, RayPatternError> {
    if count < 2 {
        return Err(RayPatternError::DegenerateFan(count));
    }

    let step = arc_degrees / (count - 1) as f32;
    let mut directions = Vec::with_capacity(count);
    for i in 0..count {
        let angle = -(arc_degrees / 2.0) + step * i as f32;
        directions.push(Quat::from_rotation_y(angle.to_radians()) * forward);
    }
    Ok(directions)
}

/// Generate `count` forward rays with origins spread evenly from
/// `-height / 2` to `+height / 2`.
pub fn vertical_fan(
    forward: Vec3,
    height: f32,
    count: usize,
) -> Result<Vec<VerticalRay>, RayPatternError> {
    if count < 2 {
        return Err(RayPatternError::DegenerateFan(count));
    }

    let step = height / (count - 1) as f32;
    let mut rays = Vec::with_capacity(count);
    for i in 0..count {
        rays.push(VerticalRay {
            direction: forward,
            height_offset: -height / 2.0 + step * i as f32,
        });
    }
    Ok(rays)
}

/// Tilt `forward` downward for the slope reference ray.
///
/// The tilt is applied as a vertical component offset before normalizing
/// rather than a rotation about the side axis; the slope gate only needs a
/// consistent reference geometry, not an exact angular rotation.
pub fn slope_ray_direction(forward: Vec3, down_angle_degrees: f32) -> Vec3 {
    let mut direction = forward;
    direction.y -= down_angle_degrees.to_radians();
    direction.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_fan_spans_arc() {
        let fan = horizontal_fan(-Vec3::Z, 10, 160.0).unwrap();
        assert_eq!(fan.len(), 10);

        // Endpoints sit at +-80 degrees from forward
        let first_angle = fan[0].dot(-Vec3::Z).acos().to_degrees();
        let last_angle = fan[9].dot(-Vec3::Z).acos().to_degrees();
        assert!((first_angle - 80.0).abs() < 1e-3);
        assert!((last_angle - 80.0).abs() < 1e-3);
        // Center of an even fan straddles forward symmetrically
        assert!((fan[4].dot(-Vec3::Z) - fan[5].dot(-Vec3::Z)).abs() < 1e-5);
    }

    #[test]
    fn test_horizontal_fan_preserves_length() {
        let fan = horizontal_fan(-Vec3::Z * 1.0, 5, 90.0).unwrap();
        for direction in fan {
            assert!((direction.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_degenerate_fan_is_config_error() {
        assert_eq!(
            horizontal_fan(-Vec3::Z, 1, 160.0),
            Err(RayPatternError::DegenerateFan(1))
        );
        assert!(vertical_fan(-Vec3::Z, 2.0, 0).is_err());
    }

    #[test]
    fn test_vertical_fan_offsets() {
        let rays = vertical_fan(-Vec3::Z, 2.0, 2).unwrap();
        assert_eq!(rays.len(), 2);
        assert!((rays[0].height_offset - -1.0).abs() < 1e-5);
        assert!((rays[1].height_offset - 1.0).abs() < 1e-5);
        assert_eq!(rays[0].direction, -Vec3::Z);

        let rays = vertical_fan(-Vec3::Z, 3.0, 4).unwrap();
        assert!((rays[1].height_offset - -0.5).abs() < 1e-5);
        assert!((rays[2].height_offset - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_slope_ray_points_downward() {
        let direction = slope_ray_direction(-Vec3::Z, 45.0);
        assert!(direction.y < 0.0);
        assert!((direction.length() - 1.0).abs() < 1e-5);
    }
}
