//! Player control: input → movement/dash, melee attack, move-animation facing.
//!
//! Execution order (GameplaySet::Input):
//! 1. apply_player_input: store latest move direction, start dash, update facing
//! 2. player_movement: direction × speed × dash factor → MovementController
//! 3. player_melee_attack: attack area from last velocity → nearest enemy → DamageRequest

use bevy::prelude::*;

use super::attack_area::{AttackArea, AttackStance};
use super::input::PlayerInputEvent;
use crate::combat::{DamageRequest, DamageSource, KnockbackRequest};
use crate::components::{
    Collider, CollisionLayer, Dash, Dead, Enemy, MovementController, Player, UnitStats,
};
use crate::config::PlayerConfig;
use crate::physics::SpatialQuery;

/// Player movement parameters and the latest requested direction.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PlayerController {
    pub move_speed: f32,
    /// Latest input direction (persists until the next input event)
    pub move_direction: Vec2,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            move_direction: Vec2::ZERO,
        }
    }
}

/// Player melee parameters.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PlayerCombat {
    pub attack_length: f32,
    pub attack_width: f32,
    /// 0 disables knockback on hit
    pub knockback_power: f32,
    /// Stance of the most recent attack
    pub stance: AttackStance,
}

impl Default for PlayerCombat {
    fn default() -> Self {
        Self {
            attack_length: 2.5,
            attack_width: 1.0,
            knockback_power: 0.0,
            stance: AttackStance::default(),
        }
    }
}

impl From<&PlayerConfig> for PlayerCombat {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            attack_length: config.attack_length,
            attack_width: config.attack_width,
            knockback_power: config.knockback_power,
            stance: AttackStance::default(),
        }
    }
}

/// Facing trigger for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum MoveFacing {
    Up,
    Left,
    Down,
    Right,
}

impl MoveFacing {
    /// Facing for a held direction, priority Up > Left > Down > Right.
    pub fn from_direction(direction: Vec2) -> Option<Self> {
        if direction.y > 0.0 {
            Some(Self::Up)
        } else if direction.x < 0.0 {
            Some(Self::Left)
        } else if direction.y < 0.0 {
            Some(Self::Down)
        } else if direction.x > 0.0 {
            Some(Self::Right)
        } else {
            None
        }
    }
}

#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct MoveAnimation {
    /// Last triggered facing (kept while idle)
    pub facing: Option<MoveFacing>,
    pub moving: bool,
}

/// System: count down dash timers.
pub fn tick_dash(mut query: Query<&mut Dash>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();
    for mut dash in query.iter_mut() {
        dash.tick(delta);
    }
}

/// System: consume input events (direction, dash, facing).
pub fn apply_player_input(
    mut input_events: EventReader<PlayerInputEvent>,
    mut players: Query<
        (&mut PlayerController, Option<&mut Dash>, Option<&mut MoveAnimation>),
        (With<Player>, Without<Dead>),
    >,
) {
    for input in input_events.read() {
        for (mut controller, dash, animation) in players.iter_mut() {
            let direction = if input.move_direction.is_nan() {
                Vec2::ZERO
            } else {
                input.move_direction
            };
            controller.move_direction = direction;

            if input.dash {
                if let Some(mut dash) = dash {
                    if dash.start() {
                        crate::log("Player dash");
                    }
                }
            }

            if let Some(mut animation) = animation {
                let facing = MoveFacing::from_direction(direction);
                animation.moving = facing.is_some();
                if facing.is_some() {
                    animation.facing = facing;
                }
            }
        }
    }
}

/// System: player desired velocity from stored direction and dash state.
pub fn player_movement(
    mut players: Query<(&PlayerController, &mut MovementController, Option<&Dash>), (With<Player>, Without<Dead>)>,
) {
    for (controller, mut movement, dash) in players.iter_mut() {
        let factor = dash.map(|d| d.speed_factor()).unwrap_or(1.0);
        movement.set_desired(controller.move_direction * controller.move_speed * factor);
    }
}

/// System: melee attack on input.
///
/// Box-overlaps the enemy layer with the attack area and hits the nearest
/// enemy with the player's damage.
pub fn player_melee_attack(
    mut input_events: EventReader<PlayerInputEvent>,
    mut players: Query<
        (Entity, &Transform, &MovementController, &UnitStats, &mut PlayerCombat, Option<&Collider>),
        (With<Player>, Without<Dead>),
    >,
    spatial: SpatialQuery,
    enemies: Query<(), (With<Enemy>, With<UnitStats>)>,
    mut damage_events: EventWriter<DamageRequest>,
    mut knockback_events: EventWriter<KnockbackRequest>,
) {
    for input in input_events.read() {
        if !input.attack {
            continue;
        }

        for (entity, transform, movement, stats, mut combat, collider) in players.iter_mut() {
            let body_size = collider.map(|c| c.size()).unwrap_or(Vec2::ONE);
            let area = AttackArea::from_last_velocity(
                movement.last_velocity,
                body_size,
                combat.attack_length,
                combat.attack_width,
            );
            combat.stance = area.stance;

            let center = area.center(transform.translation.truncate());
            let Some(target) = spatial.overlap_box(center, area.size, CollisionLayer::Enemy) else {
                continue;
            };

            if !enemies.contains(target) {
                crate::log_warning(&format!(
                    "Melee hit {:?} on the enemy layer but it has no enemy stats, ignored",
                    target
                ));
                continue;
            }

            damage_events.write(DamageRequest {
                attacker: Some(entity),
                target,
                amount: stats.damage,
                source: DamageSource::Melee,
            });

            if combat.knockback_power > 0.0 {
                knockback_events.write(KnockbackRequest {
                    target,
                    direction: area.offset.normalize_or_zero(),
                    power: combat.knockback_power,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_priority() {
        assert_eq!(MoveFacing::from_direction(Vec2::new(-1.0, 1.0)), Some(MoveFacing::Up));
        assert_eq!(MoveFacing::from_direction(Vec2::new(-1.0, -1.0)), Some(MoveFacing::Left));
        assert_eq!(MoveFacing::from_direction(Vec2::new(1.0, -1.0)), Some(MoveFacing::Down));
        assert_eq!(MoveFacing::from_direction(Vec2::X), Some(MoveFacing::Right));
        assert_eq!(MoveFacing::from_direction(Vec2::ZERO), None);
    }

    #[test]
    fn test_combat_from_config() {
        let config = PlayerConfig {
            attack_length: 3.0,
            knockback_power: 0.2,
            ..Default::default()
        };
        let combat = PlayerCombat::from(&config);
        assert_eq!(combat.attack_length, 3.0);
        assert_eq!(combat.attack_width, 1.0);
        assert_eq!(combat.knockback_power, 0.2);
    }
}
