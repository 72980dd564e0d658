//! Level/session manager: load the start level, restart, quit.
//!
//! Restart = despawn every `LevelEntity`, spawn the active level's layout
//! again. Quit = `AppExit::Success`.

use bevy::prelude::*;

pub mod level;

pub use level::{spawn_enemy, spawn_level, spawn_player, LevelSpawnReport};

use crate::components::LevelEntity;
use crate::config::GameConfig;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Restart,
    Quit,
}

/// Name of the currently loaded level.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ActiveLevel {
    pub name: String,
}

/// Event: a level was (re)spawned.
#[derive(Event, Debug, Clone)]
pub struct LevelLoaded {
    pub name: String,
    pub report: LevelSpawnReport,
}

fn load_level(commands: &mut Commands, config: &GameConfig, name: &str) -> Option<LevelSpawnReport> {
    let Some(layout) = config.level(name) else {
        crate::log_error(&format!("Level '{}' not found in config", name));
        return None;
    };

    let report = spawn_level(commands, config, layout);
    commands.insert_resource(ActiveLevel { name: name.to_string() });
    Some(report)
}

/// Startup system: spawn `config.start_level`.
pub fn load_start_level(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut loaded_events: EventWriter<LevelLoaded>,
) {
    let name = config.start_level.clone();
    if let Some(report) = load_level(&mut commands, &config, &name) {
        loaded_events.write(LevelLoaded { name, report });
    }
}

/// System: restart / quit.
pub fn handle_session_commands(
    mut commands: Commands,
    mut session_commands: EventReader<SessionCommand>,
    config: Res<GameConfig>,
    active: Option<Res<ActiveLevel>>,
    level_entities: Query<Entity, With<LevelEntity>>,
    mut exit_events: EventWriter<AppExit>,
    mut loaded_events: EventWriter<LevelLoaded>,
) {
    let mut restarted = false;

    for command in session_commands.read() {
        match command {
            SessionCommand::Restart if restarted => {
                crate::log("Restart already handled this frame, dropped");
            }
            SessionCommand::Restart => {
                restarted = true;
                let name = active
                    .as_ref()
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| config.start_level.clone());

                let mut despawned = 0;
                for entity in level_entities.iter() {
                    commands.entity(entity).despawn();
                    despawned += 1;
                }
                crate::log_info(&format!("🔄 Restarting level '{}' ({} entities cleared)", name, despawned));

                if let Some(report) = load_level(&mut commands, &config, &name) {
                    loaded_events.write(LevelLoaded { name, report });
                }
            }
            SessionCommand::Quit => {
                crate::log_info("👋 Quit requested");
                exit_events.write(AppExit::Success);
            }
        }
    }
}

/// Session Plugin
///
/// - Startup: load_start_level
/// - Update: handle_session_commands
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SessionCommand>()
            .add_event::<LevelLoaded>()
            .init_resource::<GameConfig>();

        app.add_systems(Startup, load_start_level)
            .add_systems(Update, handle_session_commands);
    }
}
