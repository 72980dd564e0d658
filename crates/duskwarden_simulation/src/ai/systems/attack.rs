//! AI attack execution (melee damage / ranged projectile).

use bevy::prelude::*;

use crate::ai::{AIConfig, AIState};
use crate::combat::{spawn_projectile, AttackCooldown, DamageRequest, DamageSource, EnemyProjectile};
use crate::components::{Dash, Dead, Enemy, Player, UnitState, UnitStats};
use crate::config::AttackStyle;

/// System: AI attack execution
///
/// Chasing + clear + target within `attack_range` + cooldown elapsed:
/// - Melee: `DamageRequest` with the enemy's damage (no hit on a dashing
///   player, cooldown untouched)
/// - Ranged: projectile from `position + range_spawn_offset` toward the
///   player's current position
///
/// Cooldown restarts after every attack that fired.
pub fn ai_attack_execution(
    mut commands: Commands,
    mut ai_query: Query<
        (Entity, &Transform, &AIState, &AIConfig, &UnitStats, &UnitState, &mut AttackCooldown),
        (With<Enemy>, Without<Dead>),
    >,
    targets: Query<(&Transform, Option<&Dash>), (With<Player>, Without<Dead>, Without<Enemy>)>,
    mut damage_events: EventWriter<DamageRequest>,
) {
    for (entity, transform, state, config, stats, unit_state, mut cooldown) in ai_query.iter_mut() {
        let Some(target) = state.target() else {
            continue;
        };
        if !unit_state.is_clear() || !cooldown.can_attack() {
            continue;
        }

        let Ok((target_transform, dash)) = targets.get(target) else {
            continue;
        };

        let position = transform.translation.truncate();
        let target_pos = target_transform.translation.truncate();
        if position.distance(target_pos) > config.attack_range {
            continue;
        }

        match config.attack_style {
            AttackStyle::Melee => {
                if dash.is_some_and(|d| d.is_dashing) {
                    continue;
                }

                damage_events.write(DamageRequest {
                    attacker: Some(entity),
                    target,
                    amount: stats.damage,
                    source: DamageSource::Melee,
                });
                crate::log(&format!("🗡️ AI: {:?} melee attack on {:?}", entity, target));
            }
            AttackStyle::Ranged => {
                let direction = target_pos - position;
                let projectile = EnemyProjectile::new(
                    entity,
                    direction,
                    config.projectile_speed,
                    stats.damage,
                    config.projectile_lifetime,
                );
                let spawned = spawn_projectile(&mut commands, position + config.range_spawn_offset, projectile);
                crate::log(&format!("🏹 AI: {:?} fired projectile {:?} at {:?}", entity, spawned, target));
            }
        }

        cooldown.start_attack();
    }
}
