//! Spatial queries: box overlap, ray cast, line of sight.
//!
//! Colliders are axis-aligned boxes (see [`Collider`]), tested with parry2d.
//! The free functions work on plain [`ColliderSample`] lists so systems that
//! mutate `Transform` can build their own candidate sets; read-only systems
//! use the [`SpatialQuery`] system param.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use parry2d::math::{Isometry, Point, Vector};
use parry2d::query::{self, Ray, RayCast};
use parry2d::shape::Cuboid;

use crate::components::{Collider, CollisionLayer, Dead};

/// A collider snapshot: entity, world center, half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderSample {
    pub entity: Entity,
    pub center: Vec2,
    pub half_extents: Vec2,
}

/// Ray cast result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    /// Distance from the ray origin along the (normalized) direction
    pub distance: f32,
    pub point: Vec2,
}

fn isometry(center: Vec2) -> Isometry<f32> {
    Isometry::translation(center.x, center.y)
}

fn cuboid(half_extents: Vec2) -> Cuboid {
    Cuboid::new(Vector::new(half_extents.x.max(0.0), half_extents.y.max(0.0)))
}

/// True if two boxes intersect (touching counts).
pub fn boxes_intersect(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
    query::intersection_test(
        &isometry(a_center),
        &cuboid(a_half),
        &isometry(b_center),
        &cuboid(b_half),
    )
    .unwrap_or(false)
}

/// Nearest candidate (by center distance) overlapping the box `center`/`size`.
pub fn overlap_box(
    center: Vec2,
    size: Vec2,
    candidates: impl IntoIterator<Item = ColliderSample>,
) -> Option<Entity> {
    let half = size.abs() * 0.5;

    candidates
        .into_iter()
        .filter(|c| boxes_intersect(center, half, c.center, c.half_extents))
        .map(|c| (c.entity, c.center.distance_squared(center)))
        .fold(None, |best: Option<(Entity, f32)>, (entity, dist)| match best {
            Some((_, best_dist)) if best_dist <= dist => best,
            _ => Some((entity, dist)),
        })
        .map(|(entity, _)| entity)
}

/// Closest candidate hit by a ray from `origin` along `direction`, up to
/// `max_distance`. A zero direction never hits.
pub fn cast_ray(
    origin: Vec2,
    direction: Vec2,
    max_distance: f32,
    candidates: impl IntoIterator<Item = ColliderSample>,
) -> Option<RayHit> {
    let dir = direction.normalize_or_zero();
    if dir == Vec2::ZERO || max_distance < 0.0 {
        return None;
    }

    let ray = Ray::new(Point::new(origin.x, origin.y), Vector::new(dir.x, dir.y));

    candidates
        .into_iter()
        .filter_map(|c| {
            cuboid(c.half_extents)
                .cast_ray(&isometry(c.center), &ray, max_distance, true)
                .map(|distance| RayHit {
                    entity: c.entity,
                    distance,
                    point: origin + dir * distance,
                })
        })
        .fold(None, |best: Option<RayHit>, hit| match best {
            Some(b) if b.distance <= hit.distance => Some(b),
            _ => Some(hit),
        })
}

/// True if no candidate blocks the segment `from` → `to`.
pub fn segment_clear(from: Vec2, to: Vec2, blockers: impl IntoIterator<Item = ColliderSample>) -> bool {
    let delta = to - from;
    let distance = delta.length();
    if distance <= f32::EPSILON {
        return true;
    }
    cast_ray(from, delta, distance, blockers).is_none()
}

/// Read-only spatial queries over every live collider, filtered by layer.
///
/// Uses `Transform` directly: all gameplay runs in `FixedUpdate`, before
/// transform propagation, so `GlobalTransform` would lag a tick.
#[derive(SystemParam)]
pub struct SpatialQuery<'w, 's> {
    colliders: Query<
        'w,
        's,
        (Entity, &'static Transform, &'static Collider, &'static CollisionLayer),
        Without<Dead>,
    >,
}

impl SpatialQuery<'_, '_> {
    /// Colliders on `layer`.
    pub fn samples(&self, layer: CollisionLayer) -> impl Iterator<Item = ColliderSample> + '_ {
        self.colliders
            .iter()
            .filter(move |(_, _, _, l)| **l == layer)
            .map(|(entity, transform, collider, _)| ColliderSample {
                entity,
                center: transform.translation.truncate(),
                half_extents: collider.half_extents,
            })
    }

    /// Collider of one entity, if it has one and is alive.
    pub fn sample(&self, entity: Entity) -> Option<ColliderSample> {
        self.colliders
            .get(entity)
            .ok()
            .map(|(entity, transform, collider, _)| ColliderSample {
                entity,
                center: transform.translation.truncate(),
                half_extents: collider.half_extents,
            })
    }

    /// Nearest collider on `layer` overlapping the box.
    pub fn overlap_box(&self, center: Vec2, size: Vec2, layer: CollisionLayer) -> Option<Entity> {
        overlap_box(center, size, self.samples(layer))
    }

    /// True if any collider on `layer` overlaps the box.
    pub fn any_overlap(&self, center: Vec2, size: Vec2, layer: CollisionLayer) -> bool {
        let half = size.abs() * 0.5;
        self.samples(layer)
            .any(|c| boxes_intersect(center, half, c.center, c.half_extents))
    }

    /// True if `entity`'s collider overlaps the box.
    pub fn entity_overlaps(&self, entity: Entity, center: Vec2, size: Vec2) -> bool {
        self.sample(entity)
            .map(|c| boxes_intersect(center, size.abs() * 0.5, c.center, c.half_extents))
            .unwrap_or(false)
    }

    pub fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer: CollisionLayer,
    ) -> Option<RayHit> {
        cast_ray(origin, direction, max_distance, self.samples(layer))
    }

    /// True if no wall blocks the segment `from` → `to`.
    pub fn line_of_sight(&self, from: Vec2, to: Vec2) -> bool {
        segment_clear(from, to, self.samples(CollisionLayer::Wall))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(index: u32, center: Vec2, size: Vec2) -> ColliderSample {
        ColliderSample {
            entity: Entity::from_raw(index),
            center,
            half_extents: size * 0.5,
        }
    }

    #[test]
    fn test_boxes_intersect() {
        assert!(boxes_intersect(Vec2::ZERO, Vec2::ONE, Vec2::new(1.5, 0.0), Vec2::ONE));
        assert!(!boxes_intersect(Vec2::ZERO, Vec2::ONE, Vec2::new(2.5, 0.0), Vec2::ONE));
        assert!(!boxes_intersect(Vec2::ZERO, Vec2::ONE, Vec2::new(0.0, -2.5), Vec2::ONE));
    }

    #[test]
    fn test_overlap_box_picks_nearest() {
        let candidates = [
            sample(1, Vec2::new(2.0, 0.0), Vec2::ONE),
            sample(2, Vec2::new(1.0, 0.0), Vec2::ONE),
            sample(3, Vec2::new(9.0, 0.0), Vec2::ONE),
        ];

        let hit = overlap_box(Vec2::new(1.25, 0.0), Vec2::new(2.5, 1.0), candidates);
        assert_eq!(hit, Some(Entity::from_raw(2)));

        let miss = overlap_box(Vec2::new(-5.0, 0.0), Vec2::ONE, candidates);
        assert_eq!(miss, None);
    }

    #[test]
    fn test_cast_ray_hits_closest_wall() {
        let walls = [
            sample(1, Vec2::new(5.0, 0.0), Vec2::new(1.0, 4.0)),
            sample(2, Vec2::new(3.0, 0.0), Vec2::new(1.0, 4.0)),
        ];

        let hit = cast_ray(Vec2::ZERO, Vec2::X * 10.0, 10.0, walls).expect("ray should hit");
        assert_eq!(hit.entity, Entity::from_raw(2));
        assert!((hit.distance - 2.5).abs() < 1e-4, "distance = {}", hit.distance);
        assert!((hit.point - Vec2::new(2.5, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_cast_ray_respects_max_distance() {
        let walls = [sample(1, Vec2::new(5.0, 0.0), Vec2::ONE)];
        assert!(cast_ray(Vec2::ZERO, Vec2::X, 4.0, walls).is_none());
        assert!(cast_ray(Vec2::ZERO, Vec2::ZERO, 10.0, walls).is_none());
    }

    #[test]
    fn test_segment_clear() {
        let walls = [sample(1, Vec2::new(0.0, 2.0), Vec2::new(10.0, 0.5))];
        assert!(!segment_clear(Vec2::ZERO, Vec2::new(0.0, 4.0), walls));
        assert!(segment_clear(Vec2::ZERO, Vec2::new(4.0, 0.0), walls));
        assert!(segment_clear(Vec2::ZERO, Vec2::ZERO, walls));
    }
}
