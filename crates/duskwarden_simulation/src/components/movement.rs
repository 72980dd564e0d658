//! Movement components: desired velocity, dash.

use bevy::prelude::*;

/// Movement controller state for a unit.
///
/// Behaviors write `desired_velocity` (units/sec); the physics movement
/// system turns it into a collision-resolved position delta each tick.
/// `last_velocity` keeps the last non-zero desired velocity and drives the
/// player's attack stance and phase offsets.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementController {
    pub desired_velocity: Vec2,
    pub last_velocity: Vec2,
}

impl MovementController {
    /// Sets the desired velocity, remembering it if non-zero.
    pub fn set_desired(&mut self, velocity: Vec2) {
        self.desired_velocity = velocity;
        if velocity != Vec2::ZERO {
            self.last_velocity = velocity;
        }
    }

    pub fn stop(&mut self) {
        self.desired_velocity = Vec2::ZERO;
    }
}

/// Player dash state.
///
/// While `is_dashing` the player moves at `speed_multiplier` times its speed
/// and enemy melee does not land.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Dash {
    pub speed_multiplier: f32,
    pub duration: f32,
    pub cooldown: f32,
    pub is_dashing: bool,
    /// Dash time left while dashing
    pub timer: f32,
    /// Time left until the next dash is allowed
    pub cooldown_timer: f32,
}

impl Default for Dash {
    fn default() -> Self {
        Self {
            speed_multiplier: 3.0,
            duration: 0.15,
            cooldown: 0.6,
            is_dashing: false,
            timer: 0.0,
            cooldown_timer: 0.0,
        }
    }
}

impl Dash {
    pub fn can_dash(&self) -> bool {
        !self.is_dashing && self.cooldown_timer <= 0.0
    }

    /// Starts a dash if allowed. Returns whether it started.
    pub fn start(&mut self) -> bool {
        if !self.can_dash() {
            return false;
        }
        self.is_dashing = true;
        self.timer = self.duration;
        true
    }

    pub fn tick(&mut self, delta: f32) {
        if self.is_dashing {
            self.timer -= delta;
            if self.timer <= 0.0 {
                self.is_dashing = false;
                self.timer = 0.0;
                self.cooldown_timer = self.cooldown;
            }
        } else if self.cooldown_timer > 0.0 {
            self.cooldown_timer = (self.cooldown_timer - delta).max(0.0);
        }
    }

    pub fn speed_factor(&self) -> f32 {
        if self.is_dashing {
            self.speed_multiplier
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_velocity_survives_stop() {
        let mut controller = MovementController::default();
        controller.set_desired(Vec2::new(-2.0, 0.0));
        controller.stop();

        assert_eq!(controller.desired_velocity, Vec2::ZERO);
        assert_eq!(controller.last_velocity, Vec2::new(-2.0, 0.0));

        controller.set_desired(Vec2::ZERO);
        assert_eq!(controller.last_velocity, Vec2::new(-2.0, 0.0));
    }

    #[test]
    fn test_dash_cycle() {
        let mut dash = Dash {
            duration: 0.2,
            cooldown: 0.5,
            ..Default::default()
        };

        assert!(dash.start());
        assert!(dash.is_dashing);
        assert!(!dash.start());
        assert_eq!(dash.speed_factor(), 3.0);

        dash.tick(0.25);
        assert!(!dash.is_dashing);
        assert!(!dash.can_dash());

        dash.tick(0.5);
        assert!(dash.can_dash());
    }
}
