//! AI movement: wander and chase → MovementController.
//!
//! Only desired velocity is written here; `physics::apply_movement` does the
//! collision-resolved move later in the tick.

use bevy::prelude::*;

use crate::ai::{AIConfig, AIState, Wander};
use crate::components::{CollisionLayer, Dead, Enemy, MovementController, Player, UnitState};
use crate::physics::SpatialQuery;
use crate::DeterministicRng;

/// Box tested at a candidate wander point.
const WANDER_POINT_CLEARANCE: Vec2 = Vec2::ONE;

/// Velocity toward `point` that does not overshoot it this tick.
pub fn approach_velocity(position: Vec2, point: Vec2, speed: f32, delta: f32) -> Vec2 {
    let offset = point - position;
    let distance = offset.length();
    if distance <= f32::EPSILON || delta <= 0.0 {
        return Vec2::ZERO;
    }
    let speed = speed.min(distance / delta);
    offset / distance * speed
}

/// System: wander sub-behavior for Wandering enemies.
///
/// 1. Delay after reaching a point: stand still
/// 2. No point: pick one in the zone (discarded if its 1×1 box touches a wall)
/// 3. Within acceptance range: clear the point, start the delay
/// 4. Wall between enemy and point: clear it, recenter origin on the enemy
/// 5. Otherwise walk toward it at wander speed
pub fn ai_wander(
    mut ai_query: Query<
        (Entity, &Transform, &AIState, &AIConfig, &UnitState, &mut Wander, &mut MovementController),
        (With<Enemy>, Without<Dead>),
    >,
    spatial: SpatialQuery,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, transform, state, config, unit_state, mut wander, mut movement) in ai_query.iter_mut() {
        if !unit_state.is_clear() {
            movement.stop();
            continue;
        }
        if *state != AIState::Wandering {
            continue;
        }
        if !config.can_wander {
            movement.stop();
            continue;
        }

        if wander.delay_timer > 0.0 {
            wander.delay_timer = (wander.delay_timer - delta).max(0.0);
            movement.stop();
            continue;
        }

        let position = transform.translation.truncate();

        let point = match wander.point {
            Some(point) => point,
            None => {
                let candidate = wander.pick_point(config.wander_range, &mut rng.rng);
                if spatial.any_overlap(candidate, WANDER_POINT_CLEARANCE, CollisionLayer::Wall) {
                    movement.stop();
                    continue;
                }
                wander.point = Some(candidate);
                candidate
            }
        };

        if position.distance(point) <= config.acceptance_range {
            wander.point = None;
            wander.delay_timer = config.wander_delay;
            movement.stop();
            continue;
        }

        if !spatial.line_of_sight(position, point) {
            crate::log(&format!(
                "AI: {:?} wander point {:?} blocked by a wall, recentering on {:?}",
                entity, point, position
            ));
            wander.point = None;
            wander.origin = position;
            movement.stop();
            continue;
        }

        movement.set_desired(approach_velocity(position, point, config.wander_speed, delta));
    }
}

/// System: chase movement for Chasing enemies.
///
/// Moves toward the target at chase speed until within attack range.
pub fn ai_chase_movement(
    mut ai_query: Query<(&Transform, &AIState, &AIConfig, &UnitState, &mut MovementController), (With<Enemy>, Without<Dead>)>,
    targets: Query<&Transform, (With<Player>, Without<Dead>, Without<Enemy>)>,
) {
    for (transform, state, config, unit_state, mut movement) in ai_query.iter_mut() {
        let Some(target) = state.target() else {
            continue;
        };

        if !unit_state.is_clear() {
            movement.stop();
            continue;
        }

        let Ok(target_transform) = targets.get(target) else {
            movement.stop();
            continue;
        };

        let position = transform.translation.truncate();
        let target_pos = target_transform.translation.truncate();
        let offset = target_pos - position;
        let distance = offset.length();

        if distance > config.attack_range {
            movement.set_desired(offset / distance * config.chase_speed);
        } else {
            movement.stop();
        }
    }
}
