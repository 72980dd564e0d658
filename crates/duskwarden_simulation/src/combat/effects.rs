//! Hit reactions: hurt flash and knockback.
//!
//! Both are timed effects ticked in `FixedUpdate`:
//! - `HurtFlash`: alternates the tint 6 times, 0.05s apart, ignores re-triggers while running
//! - `Knockback`: stuns the unit for `power` seconds and pushes it 15 times over that span

use bevy::prelude::*;

use crate::components::{Collider, UnitState, Wall};
use crate::physics::{move_with_collision, wall_samples};

pub const FLASH_REPS: u32 = 6;
pub const FLASH_DELAY: f32 = 0.05;

pub const KNOCKBACK_STEPS: u32 = 15;
pub const KNOCKBACK_SPEED: f32 = 20.0;

/// Sprite tint read by the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum Tint {
    #[default]
    Base,
    White,
    Black,
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct HurtFlash {
    /// Tint shown on the "on" phases (white for the player, black for enemies)
    pub flash_tint: Tint,
    pub current_tint: Tint,
    pub flashing: bool,
    step: u32,
    timer: f32,
}

impl Default for HurtFlash {
    fn default() -> Self {
        Self::new(Tint::White)
    }
}

impl HurtFlash {
    pub fn new(flash_tint: Tint) -> Self {
        Self {
            flash_tint,
            current_tint: Tint::Base,
            flashing: false,
            step: 0,
            timer: 0.0,
        }
    }

    /// Starts the flash. Returns false (and does nothing) if one is running.
    pub fn start(&mut self) -> bool {
        if self.flashing {
            return false;
        }
        self.flashing = true;
        self.step = 0;
        self.timer = FLASH_DELAY;
        self.current_tint = self.flash_tint;
        true
    }

    pub fn tick(&mut self, delta: f32) {
        if !self.flashing {
            return;
        }

        self.timer -= delta;
        while self.flashing && self.timer <= 0.0 {
            self.step += 1;
            if self.step >= FLASH_REPS {
                self.flashing = false;
                self.current_tint = Tint::Base;
            } else {
                self.current_tint = if self.step % 2 == 0 { self.flash_tint } else { Tint::Base };
                self.timer += FLASH_DELAY;
            }
        }
    }
}

/// System: advance hurt flashes.
pub fn tick_hurt_flash(mut query: Query<&mut HurtFlash>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();
    for mut flash in query.iter_mut() {
        flash.tick(delta);
    }
}

/// Event: push `target` along `direction` and stun it for `power` seconds.
#[derive(Event, Debug, Clone)]
pub struct KnockbackRequest {
    pub target: Entity,
    pub direction: Vec2,
    pub power: f32,
}

/// Active knockback.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Knockback {
    pub direction: Vec2,
    pub steps_remaining: u32,
    pub step_interval: f32,
    timer: f32,
}

impl Knockback {
    pub fn new(direction: Vec2, power: f32) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            steps_remaining: KNOCKBACK_STEPS,
            step_interval: power.max(0.0) / KNOCKBACK_STEPS as f32,
            timer: 0.0,
        }
    }

    /// Number of pushes due after `delta` seconds (first one is immediate).
    pub fn advance(&mut self, delta: f32) -> u32 {
        self.timer -= delta;
        let mut due = 0;
        while self.steps_remaining > 0 && self.timer <= 0.0 {
            self.steps_remaining -= 1;
            self.timer += self.step_interval;
            due += 1;
        }
        due
    }

    pub fn is_finished(&self) -> bool {
        self.steps_remaining == 0
    }
}

/// System: start knockbacks (stun + push component).
pub fn start_knockback(
    mut commands: Commands,
    mut requests: EventReader<KnockbackRequest>,
    mut states: Query<&mut UnitState>,
) {
    for request in requests.read() {
        let Ok(mut state) = states.get_mut(request.target) else {
            crate::log_warning(&format!(
                "KnockbackRequest: {:?} has no UnitState, ignored",
                request.target
            ));
            continue;
        };

        state.stun(request.power);
        commands
            .entity(request.target)
            .insert(Knockback::new(request.direction, request.power));
    }
}

/// System: apply due knockback pushes against walls.
pub fn tick_knockback(
    mut commands: Commands,
    mut pushed: Query<(Entity, &mut Transform, &mut Knockback, Option<&Collider>), Without<Wall>>,
    walls: Query<(Entity, &Transform, &Collider), With<Wall>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    if pushed.is_empty() {
        return;
    }

    let walls = wall_samples(walls.iter());

    for (entity, mut transform, mut knockback, collider) in pushed.iter_mut() {
        let due = knockback.advance(delta);
        let mut position = transform.translation.truncate();

        for _ in 0..due {
            let step = knockback.direction * KNOCKBACK_SPEED * delta;
            position = match collider {
                Some(collider) => move_with_collision(position, collider.half_extents, step, &walls),
                None => position + step,
            };
        }

        transform.translation.x = position.x;
        transform.translation.y = position.y;

        if knockback.is_finished() {
            commands.entity(entity).remove::<Knockback>();
        }
    }
}
