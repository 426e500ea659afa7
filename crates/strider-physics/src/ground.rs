//! Ground contact, slope angles, and the movement admissibility gate
//!
//! Probe-origin convention: every vertical probe originates at the
//! character's transform position, which rests exactly `height` above the
//! ground contact point. All corrections in this module assume it.

use glam::Vec3;

use crate::rays::{horizontal_fan, slope_ray_direction, vertical_fan};
use crate::world::{ObjectId, ProbeHit, WorldQuery};

/// Character bounding dimensions, derived once from model geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterDimensions {
    pub radius: f32,
    pub height: f32,
}

impl CharacterDimensions {
    /// Derive dimensions from an axis-aligned bounding box
    pub fn from_bounds(min: Vec3, max: Vec3) -> Self {
        let height = max.y - min.y;
        let radius = (max.x - min.x).max(max.z - min.z) / 2.0;
        Self { radius, height }
    }
}

/// Fan shape and slope limits for the admissibility gate
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GateConfig {
    /// Rays in the horizontal obstruction fan
    pub horizontal_ray_count: usize,
    /// Arc swept by the horizontal fan, in degrees
    pub horizontal_arc_degrees: f32,
    /// Rays in the vertical slope-sampling fan
    pub vertical_ray_count: usize,
    /// Slopes at or above this angle (degrees) veto movement
    pub max_slope_angle: f32,
    /// Downward tilt of the slope reference ray, in degrees
    pub slope_ray_angle: f32,
    /// Range of the slope reference ray
    pub slope_ray_range: f32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            horizontal_ray_count: 10,
            horizontal_arc_degrees: 160.0,
            vertical_ray_count: 2,
            max_slope_angle: 45.0,
            slope_ray_angle: crate::rays::DEFAULT_SLOPE_RAY_ANGLE,
            slope_ray_range: crate::rays::DEFAULT_SLOPE_RAY_RANGE,
        }
    }
}

impl GateConfig {
    /// Validate fan counts once at setup; degenerate fans divide by zero
    pub fn validate(&self) -> Result<(), crate::rays::RayPatternError> {
        horizontal_fan(-Vec3::Z, self.horizontal_ray_count, self.horizontal_arc_degrees)?;
        vertical_fan(-Vec3::Z, 1.0, self.vertical_ray_count)?;
        Ok(())
    }
}

/// Upward correction that lifts penetrating feet back onto the surface.
///
/// A downward hit closer than `height` means the feet are below the
/// surface; the deficit is returned as a positive lift. A hit beyond
/// `height` yields a negative value, settling the character down into
/// contact. Zero-distance hits are ignored.
pub fn penetration_correction(hit: &ProbeHit, height: f32) -> f32 {
    if hit.distance > 0.0 {
        height - hit.distance
    } else {
        0.0
    }
}

/// Local slope angle in degrees from the two reference distances, or `None`
/// when either reading is absent or zero.
///
/// Equal distances read as 45 degrees. Missing data never blocks movement,
/// so callers treat `None` as flat.
pub fn slope_angle(
    vertical_hit_distance: Option<f32>,
    slope_ray_distance: Option<f32>,
) -> Option<f32> {
    let x = vertical_hit_distance.filter(|d| *d != 0.0)?;
    let y = slope_ray_distance.filter(|d| *d != 0.0)?;
    Some(y.atan2(x).to_degrees())
}

/// Where a character of the given height rests while riding a platform:
/// the platform's own horizontal position, contact point plus `height`
/// vertically.
pub fn platform_ride_position(hit: &ProbeHit, height: f32) -> Vec3 {
    Vec3::new(
        hit.object_position.x,
        hit.point.y + height,
        hit.object_position.z,
    )
}

/// Conjunctive movement gate: a step in `direction` is admissible only if
/// every horizontal-fan ray is clear at radius range AND every vertical-fan
/// ray reads either no slope or a slope below the configured maximum.
///
/// One blocked ray or one over-steep reading vetoes the whole step; there
/// is no partial sliding. Assumes `gate` passed [`GateConfig::validate`];
/// a degenerate fan reads as blocked.
pub fn admissible<W: WorldQuery>(
    world: &W,
    position: Vec3,
    direction: Vec3,
    dims: &CharacterDimensions,
    gate: &GateConfig,
    exclude: &[ObjectId],
) -> bool {
    let Ok(horizontal) = horizontal_fan(
        direction,
        gate.horizontal_ray_count,
        gate.horizontal_arc_degrees,
    ) else {
        return false;
    };
    for ray_direction in &horizontal {
        if world
            .cast_ray(position, *ray_direction, dims.radius, exclude)
            .is_some()
        {
            return false;
        }
    }

    let slope_reference = world.cast_ray(
        position,
        slope_ray_direction(direction, gate.slope_ray_angle),
        gate.slope_ray_range,
        exclude,
    );

    let Ok(vertical) = vertical_fan(direction, dims.height, gate.vertical_ray_count) else {
        return false;
    };
    for ray in &vertical {
        let origin = position + Vec3::Y * ray.height_offset;
        let hit = world.cast_ray(origin, ray.direction, dims.radius, exclude);
        if let Some(angle) = slope_angle(
            hit.map(|h| h.distance),
            slope_reference.as_ref().map(|h| h.distance),
        ) {
            if angle >= gate.max_slope_angle {
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ObjectTag;

    fn hit_at(distance: f32) -> ProbeHit {
        ProbeHit {
            distance,
            point: Vec3::ZERO,
            normal: Vec3::Y,
            object: ObjectId(0),
            tag: ObjectTag::Static,
            object_position: Vec3::ZERO,
        }
    }

    /// World that blocks probes whose direction lines up with a listed one.
    struct DirectionalWorld {
        blocked: Vec<Vec3>,
        blocked_distance: f32,
        slope_distance: Option<f32>,
    }

    impl WorldQuery for DirectionalWorld {
        fn cast_ray(
            &self,
            _origin: Vec3,
            direction: Vec3,
            max_distance: f32,
            _exclude: &[ObjectId],
        ) -> Option<ProbeHit> {
            let direction = direction.normalize();
            if direction.y < -0.3 {
                // Slope reference ray
                return self
                    .slope_distance
                    .filter(|d| *d < max_distance)
                    .map(hit_at);
            }
            for blocked in &self.blocked {
                if direction.dot(blocked.normalize()) > 0.9999
                    && self.blocked_distance < max_distance
                {
                    return Some(hit_at(self.blocked_distance));
                }
            }
            None
        }
    }

    #[test]
    fn test_dimensions_from_bounds() {
        let dims =
            CharacterDimensions::from_bounds(Vec3::new(-0.4, 0.0, -0.3), Vec3::new(0.4, 1.8, 0.3));
        assert!((dims.height - 1.8).abs() < 1e-5);
        assert!((dims.radius - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_penetration_correction_zero_at_rest() {
        assert_eq!(penetration_correction(&hit_at(1.8), 1.8), 0.0);
    }

    #[test]
    fn test_penetration_correction_lifts_overlap() {
        assert!((penetration_correction(&hit_at(1.5), 1.8) - 0.3).abs() < 1e-5);
        // Beyond resting clearance the correction settles the character down
        assert!(penetration_correction(&hit_at(2.0), 1.8) < 0.0);
    }

    #[test]
    fn test_slope_angle_equal_distances_is_45() {
        let angle = slope_angle(Some(2.0), Some(2.0)).unwrap();
        assert!((angle - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_slope_angle_permissive_on_missing_data() {
        assert_eq!(slope_angle(None, Some(2.0)), None);
        assert_eq!(slope_angle(Some(2.0), None), None);
        assert_eq!(slope_angle(Some(0.0), Some(2.0)), None);
        assert_eq!(slope_angle(Some(2.0), Some(0.0)), None);
    }

    #[test]
    fn test_gate_vetoes_on_single_blocked_ray() {
        let dims = CharacterDimensions {
            radius: 0.5,
            height: 1.8,
        };
        let gate = GateConfig::default();
        let forward = -Vec3::Z;

        // Block the fan's last ray only (+80 degrees off forward)
        let edge = glam::Quat::from_rotation_y(80f32.to_radians()) * forward;
        let mut world = DirectionalWorld {
            blocked: vec![edge],
            blocked_distance: 0.2,
            slope_distance: None,
        };
        assert!(!admissible(&world, Vec3::ZERO, forward, &dims, &gate, &[]));

        world.blocked.clear();
        assert!(admissible(&world, Vec3::ZERO, forward, &dims, &gate, &[]));
    }

    #[test]
    fn test_gate_vetoes_with_minimum_fan() {
        let dims = CharacterDimensions {
            radius: 0.5,
            height: 1.8,
        };
        let gate = GateConfig {
            horizontal_ray_count: 2,
            horizontal_arc_degrees: 90.0,
            ..Default::default()
        };
        let forward = -Vec3::Z;
        let edge = glam::Quat::from_rotation_y(45f32.to_radians()) * forward;

        let world = DirectionalWorld {
            blocked: vec![edge],
            blocked_distance: 0.2,
            slope_distance: None,
        };
        assert!(!admissible(&world, Vec3::ZERO, forward, &dims, &gate, &[]));
    }

    #[test]
    fn test_gate_slope_boundary() {
        let dims = CharacterDimensions {
            radius: 2.0,
            height: 1.8,
        };
        let gate = GateConfig::default();
        let forward = -Vec3::Z;

        // Vertical-fan hit at the same distance as the slope reference
        // reads 45 degrees, which is at the max and must block.
        let at_max = DirectionalWorld {
            blocked: vec![forward],
            blocked_distance: 1.5,
            slope_distance: Some(1.5),
        };
        assert!(!admissible(&at_max, Vec3::ZERO, forward, &dims, &gate, &[]));

        // A shorter slope reference reads below 45 degrees and passes.
        let below_max = DirectionalWorld {
            blocked: vec![forward],
            blocked_distance: 1.5,
            slope_distance: Some(1.4),
        };
        assert!(admissible(&below_max, Vec3::ZERO, forward, &dims, &gate, &[]));
    }

    #[test]
    fn test_gate_config_validation() {
        assert!(GateConfig::default().validate().is_ok());
        let degenerate = GateConfig {
            horizontal_ray_count: 1,
            ..Default::default()
        };
        assert!(degenerate.validate().is_err());
    }
}
