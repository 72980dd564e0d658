//! FSM AI systems (target acquisition and loss).

use bevy::prelude::*;

use crate::ai::{AIConfig, AIState};
use crate::components::{CollisionLayer, Dead, Enemy, Player, UnitState};
use crate::physics::SpatialQuery;

/// System: AI FSM transitions
///
/// - Wandering → Chasing: player collider overlaps the sight box and no wall
///   blocks the ray enemy → player
/// - Chasing → Wandering: target dead/despawned, no longer overlaps the chase
///   box, or a wall blocks the ray
///
/// Stunned enemies keep their state untouched.
pub fn ai_fsm_transitions(
    mut ai_query: Query<(Entity, &Transform, &mut AIState, &AIConfig, &UnitState), (With<Enemy>, Without<Dead>)>,
    players: Query<(), (With<Player>, Without<Dead>)>,
    spatial: SpatialQuery,
) {
    for (entity, transform, mut state, config, unit_state) in ai_query.iter_mut() {
        if !unit_state.is_clear() {
            continue;
        }

        let position = transform.translation.truncate();

        let new_state = match *state {
            AIState::Wandering => {
                let Some(candidate) = spatial.overlap_box(position, config.sight_range, CollisionLayer::Player) else {
                    continue;
                };

                if !players.contains(candidate) {
                    crate::log_warning(&format!(
                        "AI: {:?} sighted {:?} on the player layer without a Player marker, ignored",
                        entity, candidate
                    ));
                    continue;
                }

                let Some(target) = spatial.sample(candidate) else {
                    continue;
                };

                if !spatial.line_of_sight(position, target.center) {
                    continue;
                }

                crate::log(&format!("⚔️ AI: {:?} Wandering → Chasing (target {:?})", entity, candidate));
                AIState::Chasing { target: candidate }
            }

            AIState::Chasing { target } => {
                let reason = if !players.contains(target) {
                    Some("target dead or gone")
                } else if !spatial.entity_overlaps(target, position, config.chase_range) {
                    Some("target out of chase range")
                } else {
                    match spatial.sample(target) {
                        Some(sample) if spatial.line_of_sight(position, sample.center) => None,
                        _ => Some("line of sight blocked"),
                    }
                };

                let Some(reason) = reason else {
                    continue;
                };

                crate::log(&format!("🚶 AI: {:?} Chasing → Wandering ({})", entity, reason));
                AIState::Wandering
            }
        };

        *state = new_state;
    }
}
