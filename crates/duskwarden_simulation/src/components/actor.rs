//! Actor markers and per-unit state: Player, Enemy, UnitState, respawn.

use bevy::prelude::*;

use super::{BaseStats, MovementController, UnitStats};

/// Marker for the player-controlled unit.
///
/// Input systems use `With<Player>`, enemy perception queries the player
/// collision layer. Normally exactly one entity carries it.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, UnitStats, BaseStats, UnitState, MovementController)]
pub struct Player;

/// Marker for AI-controlled hostile units.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, UnitStats, BaseStats, UnitState, MovementController)]
pub struct Enemy;

/// Marker: entity belongs to the loaded level and is despawned on restart.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelEntity;

/// Marker: entity's health reached zero this tick (set by damage handling).
#[derive(Component, Debug)]
pub struct Dead;

/// Units with this component respawn at `spawn_point` instead of being destroyed.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Respawnable {
    pub spawn_point: Vec2,
}

/// Externally imposed unit state (stun).
///
/// A stunned unit makes no decisions and ignores its desired velocity.
/// Forced displacement (knockback) still applies.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct UnitState {
    /// Seconds of stun left (never negative)
    pub stun_timer: f32,
}

impl UnitState {
    /// Stuns for `duration` seconds; a longer running stun is kept.
    pub fn stun(&mut self, duration: f32) {
        self.stun_timer = self.stun_timer.max(duration.max(0.0));
    }

    pub fn tick(&mut self, delta: f32) {
        self.stun_timer = (self.stun_timer - delta).max(0.0);
    }

    /// True when nothing prevents the unit from acting.
    pub fn is_clear(&self) -> bool {
        self.stun_timer <= 0.0
    }
}

/// System: count down stun timers.
pub fn tick_unit_states(mut query: Query<&mut UnitState>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut state in query.iter_mut() {
        if state.stun_timer > 0.0 {
            state.tick(delta);
        }
    }
}
