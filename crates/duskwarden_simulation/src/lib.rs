//! Duskwarden Simulation Core
//!
//! 2D action-game gameplay layer on Bevy 0.16 ECS, headless:
//! - Enemy AI (wander / chase / attack / phase)
//! - Player melee combat, dash, input events
//! - Health/damage stat model, death and respawn
//! - Level session (load, restart, quit) and UI data widgets
//!
//! Rendering, audio and animation playback live in the host app; it reads
//! components (`HurtFlash::current_tint`, `MoveAnimation`, `DiaryView`,
//! `PlayerHealthBar`) and writes input events.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod physics;
pub mod player;
pub mod session;
pub mod ui;

pub use ai::{AIConfig, AIPlugin, AIState, PhaseRequest, PhaseStyle, Wander};
pub use combat::{
    AttackCooldown, CombatPlugin, DamageDealt, DamageRequest, DamageSource, EnemyProjectile, EntityDied, HurtFlash,
    KnockbackRequest, PlayerRespawned, Tint,
};
pub use components::*;
pub use config::{ConfigError, GameConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use player::{InputBindings, PlayerInputEvent, PlayerPlugin};
pub use session::{ActiveLevel, LevelLoaded, SessionCommand, SessionPlugin};
pub use ui::{DiaryData, DiaryView, PlayerHealthBar, ShowDiary, UiPlugin};

/// Simulation tick (60 Hz).
pub const FIXED_TIMESTEP: Duration = Duration::from_nanos(16_666_667);

/// Per-tick gameplay phases (FixedUpdate), run in this order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Stun, cooldown, dash and flash timers
    Timers,
    /// Player input, movement intent, melee attack
    Input,
    /// Enemy FSM, wander/chase intent, enemy attacks
    Ai,
    /// Collision-resolved movement, projectiles
    Movement,
    /// Damage application, death/respawn
    Damage,
    /// Hurt flash, knockback, health bar
    Reactions,
}

/// Main simulation plugin (all subsystems)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_duration(FIXED_TIMESTEP))
            .configure_sets(
                FixedUpdate,
                (
                    GameplaySet::Timers,
                    GameplaySet::Input,
                    GameplaySet::Ai,
                    GameplaySet::Movement,
                    GameplaySet::Damage,
                    GameplaySet::Reactions,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, tick_unit_states.in_set(GameplaySet::Timers))
            .add_plugins((
                physics::PhysicsPlugin,
                CombatPlugin,
                PlayerPlugin,
                AIPlugin,
                SessionPlugin,
                UiPlugin,
            ));

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Deterministic RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Minimal Bevy App for headless simulation.
///
/// Every `app.update()` after the first advances time by exactly one
/// `FIXED_TIMESTEP`, so it runs exactly one FixedUpdate tick. The first
/// update runs Startup only.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_duration(FIXED_TIMESTEP))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FIXED_TIMESTEP));

    app
}

/// Snapshot of every `T` in the world, ordered by entity index.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
