//! World geometry components: colliders, collision layers, walls.

use bevy::prelude::*;

/// Collision layer a collider belongs to (queries filter by layer).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum CollisionLayer {
    Wall,
    Player,
    Enemy,
    Projectile,
}

/// Axis-aligned box collider centered on the entity's translation.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Collider {
    pub half_extents: Vec2,
}

impl Collider {
    /// Box with the given full size.
    pub fn from_size(size: Vec2) -> Self {
        Self {
            half_extents: size.abs() * 0.5,
        }
    }

    /// Full size of the box.
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }
}

/// Static level geometry. Blocks movement, sight and projectiles.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Wall;

/// Spawn bundle for a wall box.
pub fn wall_bundle(center: Vec2, size: Vec2) -> (Wall, Transform, Collider, CollisionLayer) {
    (
        Wall,
        Transform::from_translation(center.extend(0.0)),
        Collider::from_size(size),
        CollisionLayer::Wall,
    )
}
