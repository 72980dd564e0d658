//! Enemy AI components (state machine, config, wander state).

use bevy::prelude::*;
use rand::Rng;

use crate::config::{AttackStyle, EnemyConfig};

/// Enemy FSM state.
///
/// Stunned is not a state here: `UnitState` gates every AI system, the FSM
/// just resumes where it was once the stun wears off.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum AIState {
    /// Looking for a player, wandering around the wander origin
    #[default]
    Wandering,

    /// Pursuing (and attacking when in range) a detected player
    Chasing {
        /// Non-owning handle, validated every tick
        target: Entity,
    },
}

impl AIState {
    pub fn target(&self) -> Option<Entity> {
        match self {
            AIState::Chasing { target } => Some(*target),
            AIState::Wandering => None,
        }
    }
}

/// Enemy AI parameters (from an `EnemyConfig` preset).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AIConfig {
    pub attack_style: AttackStyle,
    pub attack_range: f32,
    pub range_spawn_offset: Vec2,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub wander_speed: f32,
    pub can_wander: bool,
    pub wander_range: Vec2,
    pub acceptance_range: f32,
    pub wander_delay: f32,
    pub chase_speed: f32,
    /// Detection box (full size) while wandering
    pub sight_range: Vec2,
    /// Detection box (full size) while chasing
    pub chase_range: Vec2,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self::from(&EnemyConfig::default())
    }
}

impl From<&EnemyConfig> for AIConfig {
    fn from(config: &EnemyConfig) -> Self {
        Self {
            attack_style: config.attack_style,
            attack_range: config.attack_range,
            range_spawn_offset: Vec2::from(config.range_spawn_offset),
            projectile_speed: config.projectile_speed,
            projectile_lifetime: config.projectile_lifetime,
            wander_speed: config.wander_speed,
            can_wander: config.can_wander,
            wander_range: Vec2::from(config.wander_range),
            acceptance_range: config.acceptance_range,
            wander_delay: config.wander_delay,
            chase_speed: config.chase_speed,
            sight_range: Vec2::from(config.sight_range),
            chase_range: Vec2::from(config.chase_range),
        }
    }
}

/// Wander sub-behavior state.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct Wander {
    /// Center of the wander zone (recentered when a wall blocks the path)
    pub origin: Vec2,
    /// Current destination, `None` until one is picked
    pub point: Option<Vec2>,
    /// Idle time left after reaching a point
    pub delay_timer: f32,
}

impl Wander {
    pub fn new(origin: Vec2) -> Self {
        Self {
            origin,
            point: None,
            delay_timer: 0.0,
        }
    }

    /// Zone bounds `(min, max)` for a zone of full size `range`.
    pub fn zone(&self, range: Vec2) -> (Vec2, Vec2) {
        let half = range.abs() * 0.5;
        (self.origin - half, self.origin + half)
    }

    /// Uniform random point inside the zone.
    pub fn pick_point<R: Rng + ?Sized>(&self, range: Vec2, rng: &mut R) -> Vec2 {
        let (min, max) = self.zone(range);
        Vec2::new(rng.gen_range(min.x..=max.x), rng.gen_range(min.y..=max.y))
    }

    pub fn in_zone(&self, position: Vec2, range: Vec2) -> bool {
        let (min, max) = self.zone(range);
        position.x >= min.x && position.x <= max.x && position.y >= min.y && position.y <= max.y
    }
}
