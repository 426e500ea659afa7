//! Tagged collision world backed by rapier3d's query pipeline

use std::collections::HashMap;

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;

/// Stable identifier for an object registered in the collision world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u64);

/// Semantic tag attached to world geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectTag {
    /// Ordinary static geometry (terrain, walls, props)
    Static,
    /// A platform whose transform is advanced externally each frame
    MovingPlatform,
    /// A character's own geometry (normally self-excluded from probes)
    Character,
}

/// Probe visibility layer for a collider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Solid world geometry, visible to probes
    World,
    /// Debug/vfx helpers, never hit by probes
    Debug,
}

/// Result of a single ray probe against the world
#[derive(Debug, Clone)]
pub struct ProbeHit {
    /// Distance along the ray to the hit point
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Surface normal at the hit point
    pub normal: Vec3,
    /// The object that was hit
    pub object: ObjectId,
    /// Semantic tag of the hit object
    pub tag: ObjectTag,
    /// The hit object's own translation (needed to ride moving platforms)
    pub object_position: Vec3,
}

/// The external geometry query seam.
///
/// A miss is the common case and is represented as `None`, never an error.
pub trait WorldQuery {
    /// Cast a single ray and return the nearest hit strictly closer than
    /// `max_distance`, skipping everything in `exclude` and all
    /// [`Layer::Debug`] geometry.
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: &[ObjectId],
    ) -> Option<ProbeHit>;
}

/// Intersectable geometry collection with per-object tags and layers.
///
/// Colliders are stored in rapier sets so probes reuse its BVH-accelerated
/// query pipeline, but no simulation step ever runs; bodies exist only to
/// satisfy the query API.
pub struct CollisionWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    query_pipeline: QueryPipeline,
    handles: HashMap<ObjectId, ColliderHandle>,
    meta: HashMap<ColliderHandle, (ObjectId, ObjectTag, Layer)>,
    next_id: u64,
}

impl CollisionWorld {
    /// Create an empty collision world
    pub fn new() -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
            handles: HashMap::new(),
            meta: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register a collider with a tag and layer
    pub fn add_object(&mut self, collider: Collider, tag: ObjectTag, layer: Layer) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;

        let handle = self.colliders.insert(collider);
        self.handles.insert(id, handle);
        self.meta.insert(handle, (id, tag, layer));
        self.query_pipeline.update(&self.colliders);
        id
    }

    /// Add an infinite ground plane at the given height
    pub fn create_ground(&mut self, y: f32) -> ObjectId {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .build();
        self.add_object(ground, ObjectTag::Static, Layer::World)
    }

    /// Add a static box obstacle
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ObjectId {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.add_object(collider, ObjectTag::Static, Layer::World)
    }

    /// Add a box platform whose transform the host advances each frame
    pub fn create_platform(&mut self, half_extents: Vec3, position: Vec3) -> ObjectId {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.add_object(collider, ObjectTag::MovingPlatform, Layer::World)
    }

    /// Move an object to a new translation (moving platforms, character geometry)
    pub fn set_object_position(&mut self, id: ObjectId, position: Vec3) {
        if let Some(handle) = self.handles.get(&id) {
            if let Some(collider) = self.colliders.get_mut(*handle) {
                collider.set_translation(vector![position.x, position.y, position.z]);
            }
            self.query_pipeline.update(&self.colliders);
        }
    }

    /// Get an object's current translation
    pub fn object_position(&self, id: ObjectId) -> Option<Vec3> {
        let handle = self.handles.get(&id)?;
        let collider = self.colliders.get(*handle)?;
        let t = collider.translation();
        Some(Vec3::new(t.x, t.y, t.z))
    }

    /// Number of registered objects
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether the world holds no geometry
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldQuery for CollisionWorld {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: &[ObjectId],
    ) -> Option<ProbeHit> {
        let length = direction.length();
        if length <= f32::EPSILON || max_distance <= 0.0 {
            return None;
        }
        let direction = direction / length;

        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        let visible = |handle: ColliderHandle, _collider: &Collider| -> bool {
            match self.meta.get(&handle) {
                Some((id, _tag, layer)) => *layer != Layer::Debug && !exclude.contains(id),
                None => false,
            }
        };
        let filter = QueryFilter::default().predicate(&visible);

        let (handle, intersection) = self.query_pipeline.cast_ray_and_get_normal(
            &self.bodies,
            &self.colliders,
            &ray,
            max_distance,
            true,
            filter,
        )?;

        // Hits at exactly max_distance do not count
        if intersection.time_of_impact >= max_distance {
            return None;
        }

        let (id, tag, _layer) = *self.meta.get(&handle)?;
        let object_position = {
            let t = self.colliders.get(handle)?.translation();
            Vec3::new(t.x, t.y, t.z)
        };

        Some(ProbeHit {
            distance: intersection.time_of_impact,
            point: origin + direction * intersection.time_of_impact,
            normal: Vec3::new(
                intersection.normal.x,
                intersection.normal.y,
                intersection.normal.z,
            ),
            object: id,
            tag,
            object_position,
        })
    }
}

/// Height of the reference oscillating platform at a given elapsed time.
///
/// Sweeps between 2 and 6 world units with a one-second angular frequency.
pub fn platform_oscillation(elapsed_seconds: f32) -> f32 {
    4.0 + elapsed_seconds.sin() * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_probe_hits_plane() {
        let mut world = CollisionWorld::new();
        world.create_ground(0.0);

        let hit = world
            .cast_ray(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y, 100.0, &[])
            .expect("downward probe should hit the ground plane");
        assert!((hit.distance - 10.0).abs() < 1e-4);
        assert!(hit.point.y.abs() < 1e-4);
        assert!((hit.normal.y - 1.0).abs() < 1e-4);
        assert_eq!(hit.tag, ObjectTag::Static);
    }

    #[test]
    fn test_miss_is_none() {
        let mut world = CollisionWorld::new();
        world.create_ground(0.0);
        // Upward ray over an upward-facing plane never intersects
        assert!(world
            .cast_ray(Vec3::new(0.0, 1.0, 0.0), Vec3::Y, 100.0, &[])
            .is_none());
    }

    #[test]
    fn test_hit_at_max_distance_excluded() {
        let mut world = CollisionWorld::new();
        world.create_ground(0.0);
        let origin = Vec3::new(0.0, 5.0, 0.0);
        assert!(world.cast_ray(origin, Vec3::NEG_Y, 5.0, &[]).is_none());
        assert!(world.cast_ray(origin, Vec3::NEG_Y, 5.001, &[]).is_some());
    }

    #[test]
    fn test_exclusion_skips_own_geometry() {
        let mut world = CollisionWorld::new();
        let own = world.create_static_box(Vec3::splat(0.5), Vec3::new(0.0, 0.0, -2.0));

        let origin = Vec3::ZERO;
        assert!(world.cast_ray(origin, Vec3::NEG_Z, 10.0, &[]).is_some());
        assert!(world.cast_ray(origin, Vec3::NEG_Z, 10.0, &[own]).is_none());
    }

    #[test]
    fn test_debug_layer_invisible_to_probes() {
        let mut world = CollisionWorld::new();
        let gizmo = ColliderBuilder::cuboid(0.5, 0.5, 0.5)
            .translation(vector![0.0, 0.0, -2.0])
            .build();
        world.add_object(gizmo, ObjectTag::Static, Layer::Debug);

        assert!(world.cast_ray(Vec3::ZERO, Vec3::NEG_Z, 10.0, &[]).is_none());
    }

    #[test]
    fn test_platform_reports_tag_and_position() {
        let mut world = CollisionWorld::new();
        let platform = world.create_platform(Vec3::new(1.0, 0.05, 1.0), Vec3::new(2.0, 4.0, 20.0));

        let hit = world
            .cast_ray(Vec3::new(2.0, 10.0, 20.0), Vec3::NEG_Y, 100.0, &[])
            .expect("probe should hit the platform");
        assert_eq!(hit.tag, ObjectTag::MovingPlatform);
        assert_eq!(hit.object_position, Vec3::new(2.0, 4.0, 20.0));

        world.set_object_position(platform, Vec3::new(2.0, 5.0, 20.0));
        let hit = world
            .cast_ray(Vec3::new(2.0, 10.0, 20.0), Vec3::NEG_Y, 100.0, &[])
            .expect("probe should follow the moved platform");
        assert_eq!(hit.object_position, Vec3::new(2.0, 5.0, 20.0));
        assert!((hit.point.y - 5.05).abs() < 1e-4);
    }

    #[test]
    fn test_platform_oscillation_bounds() {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for i in 0..1000 {
            let y = platform_oscillation(i as f32 * 0.01);
            min = min.min(y);
            max = max.max(y);
        }
        assert!(min >= 2.0 - 1e-4);
        assert!(max <= 6.0 + 1e-4);
    }
}
