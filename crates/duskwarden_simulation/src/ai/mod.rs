//! Enemy AI module
//!
//! FSM: Wandering ⇄ Chasing, with attacks as a sub-state of Chasing.
//! Stun (`UnitState`) suspends every decision.

use bevy::prelude::*;

pub mod components;
pub mod systems;

pub use components::{AIConfig, AIState, Wander};
pub use systems::{phase_point, PhaseRequest, PhaseStyle};

use crate::GameplaySet;

/// AI Plugin
///
/// Registers the AI systems in FixedUpdate (GameplaySet::Ai).
/// Execution order:
/// 1. ai_fsm_transitions — acquire / lose target
/// 2. ai_wander — wander sub-behavior → MovementController
/// 3. ai_chase_movement — chase → MovementController
/// 4. ai_attack_execution — melee DamageRequest / projectile spawn
/// 5. handle_phase_requests — teleports next to the player
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PhaseRequest>();

        app.add_systems(
            FixedUpdate,
            (
                systems::ai_fsm_transitions,
                systems::ai_wander,
                systems::ai_chase_movement,
                systems::ai_attack_execution,
                systems::handle_phase_requests,
            )
                .chain()
                .in_set(GameplaySet::Ai),
        );
    }
}
