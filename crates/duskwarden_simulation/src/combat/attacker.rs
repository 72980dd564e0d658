//! Attack cooldown gate.
//!
//! Starts full (a freshly spawned enemy waits one cooldown before its first
//! attack), counts down every fixed tick, never goes negative and is reset to
//! the configured cooldown after each attack.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AttackCooldown {
    /// Cooldown between attacks (seconds)
    pub cooldown: f32,

    /// Current timer (counts down to 0)
    pub timer: f32,
}

impl Default for AttackCooldown {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl AttackCooldown {
    pub fn new(cooldown: f32) -> Self {
        let cooldown = cooldown.max(0.0);
        Self { cooldown, timer: cooldown }
    }

    /// Cooldown elapsed.
    pub fn can_attack(&self) -> bool {
        self.timer <= 0.0
    }

    /// Call after an attack fired.
    pub fn start_attack(&mut self) {
        self.timer = self.cooldown;
    }

    pub fn tick(&mut self, delta: f32) {
        if self.timer > 0.0 {
            self.timer = (self.timer - delta).max(0.0);
        }
    }
}

/// System: count down attack cooldowns.
pub fn tick_attack_cooldowns(mut query: Query<&mut AttackCooldown>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut cooldown in query.iter_mut() {
        cooldown.tick(delta);
    }
}
