//! Enemy projectiles.
//!
//! Spawned by ranged enemies, fly in a straight line, hit the first player
//! they touch (→ `DamageRequest`) and are destroyed by walls or when their
//! lifetime runs out.

use bevy::prelude::*;

use super::damage::{DamageRequest, DamageSource};
use crate::components::{Collider, CollisionLayer, Dead, LevelEntity, Player};
use crate::physics::boxes_intersect;

pub const PROJECTILE_SIZE: f32 = 0.25;

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform, LevelEntity)]
pub struct EnemyProjectile {
    pub owner: Entity,
    /// Normalized flight direction
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    /// Seconds left before it disappears
    pub lifetime: f32,
}

impl EnemyProjectile {
    pub fn new(owner: Entity, direction: Vec2, speed: f32, damage: f32, lifetime: f32) -> Self {
        Self {
            owner,
            direction: direction.normalize_or_zero(),
            speed,
            damage,
            lifetime,
        }
    }
}

/// Spawns a projectile at `origin`.
pub fn spawn_projectile(commands: &mut Commands, origin: Vec2, projectile: EnemyProjectile) -> Entity {
    commands
        .spawn((
            Name::new("EnemyProjectile"),
            Transform::from_xyz(origin.x, origin.y, 0.0),
            Collider::from_size(Vec2::splat(PROJECTILE_SIZE)),
            CollisionLayer::Projectile,
            projectile,
        ))
        .id()
}

/// System: fly, hit, expire.
pub fn move_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Transform, &mut EnemyProjectile, &Collider)>,
    obstacles: Query<
        (Entity, &Transform, &Collider, &CollisionLayer, Has<Player>),
        (Without<EnemyProjectile>, Without<Dead>),
    >,
    mut damage_events: EventWriter<DamageRequest>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut transform, mut projectile, collider) in projectiles.iter_mut() {
        projectile.lifetime -= delta;
        if projectile.lifetime <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }

        let position = transform.translation.truncate() + projectile.direction * projectile.speed * delta;
        transform.translation.x = position.x;
        transform.translation.y = position.y;

        let hit_player = obstacles.iter().find(|(_, t, c, layer, is_player)| {
            **layer == CollisionLayer::Player
                && *is_player
                && boxes_intersect(position, collider.half_extents, t.translation.truncate(), c.half_extents)
        });

        if let Some((player, ..)) = hit_player {
            damage_events.write(DamageRequest {
                attacker: Some(projectile.owner),
                target: player,
                amount: projectile.damage,
                source: DamageSource::Ranged,
            });
            commands.entity(entity).despawn();
            continue;
        }

        let hit_wall = obstacles.iter().any(|(_, t, c, layer, _)| {
            *layer == CollisionLayer::Wall
                && boxes_intersect(position, collider.half_extents, t.translation.truncate(), c.half_extents)
        });

        if hit_wall {
            commands.entity(entity).despawn();
        }
    }
}
