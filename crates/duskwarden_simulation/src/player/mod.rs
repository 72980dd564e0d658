//! Player module
//!
//! Input events and bindings, movement with dash, melee attack.
//!
//! The player entity is marked with [`crate::components::Player`]; AI systems
//! never touch it.

use bevy::input::InputSystem;
use bevy::prelude::*;

pub mod attack_area;
pub mod control;
pub mod input;

#[cfg(test)]
mod attack_area_tests;

pub use attack_area::{AttackArea, AttackStance};
pub use control::{MoveAnimation, MoveFacing, PlayerCombat, PlayerController};
pub use input::{InputBindings, PlayerInputEvent};

use crate::GameplaySet;

/// Player Plugin
///
/// - PreUpdate: keyboard → PlayerInputEvent (only if an input plugin is present)
/// - FixedUpdate Timers: dash timers
/// - FixedUpdate Input: apply_player_input → player_movement → player_melee_attack
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerInputEvent>()
            .init_resource::<InputBindings>();

        app.add_systems(PreUpdate, input::read_keyboard_input.after(InputSystem));

        app.add_systems(
            FixedUpdate,
            (
                control::tick_dash.in_set(GameplaySet::Timers),
                (
                    control::apply_player_input,
                    control::player_movement,
                    control::player_melee_attack,
                )
                    .chain()
                    .in_set(GameplaySet::Input),
            ),
        );
    }
}
