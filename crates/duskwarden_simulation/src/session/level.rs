//! Level spawning from a [`LevelLayout`].

use bevy::prelude::*;

use crate::ai::{AIConfig, AIState, Wander};
use crate::combat::{AttackCooldown, HurtFlash, Tint};
use crate::components::{
    wall_bundle, BaseStats, Collider, CollisionLayer, Dash, Enemy, LevelEntity, Player, Respawnable, UnitStats,
};
use crate::config::{EnemyConfig, GameConfig, LevelLayout, PlayerConfig};
use crate::player::{MoveAnimation, PlayerCombat, PlayerController};

/// What a level load produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelSpawnReport {
    pub player: Option<Entity>,
    pub enemies: usize,
    pub walls: usize,
}

pub fn spawn_player(commands: &mut Commands, config: &PlayerConfig, spawn_point: Vec2) -> Entity {
    let base = BaseStats {
        health: config.health,
        damage: config.damage,
    };

    let mut entity_commands = commands.spawn((
        (
            Player,
            Name::new("Player"),
            LevelEntity,
            Transform::from_xyz(spawn_point.x, spawn_point.y, 0.0),
        ),
        (
            base,
            UnitStats::from(base),
            Collider::from_size(Vec2::from(config.body_size)),
            CollisionLayer::Player,
        ),
        (
            PlayerController {
                move_speed: config.move_speed,
                move_direction: Vec2::ZERO,
            },
            PlayerCombat::from(config),
            Dash {
                speed_multiplier: config.dash_speed_multiplier,
                duration: config.dash_duration,
                cooldown: config.dash_cooldown,
                ..Default::default()
            },
            MoveAnimation::default(),
            HurtFlash::new(Tint::White),
        ),
    ));

    if config.respawn {
        entity_commands.insert(Respawnable { spawn_point });
    }

    crate::log(&format!(
        "Player initialized at {:.0} health and {:.0} damage",
        base.health, base.damage
    ));

    entity_commands.id()
}

pub fn spawn_enemy(
    commands: &mut Commands,
    label: &str,
    preset: &EnemyConfig,
    position: Vec2,
    wander_origin: Vec2,
) -> Entity {
    let base = BaseStats {
        health: preset.health,
        damage: preset.damage,
    };

    let entity = commands
        .spawn((
            (
                Enemy,
                Name::new(label.to_string()),
                LevelEntity,
                Transform::from_xyz(position.x, position.y, 0.0),
            ),
            (
                base,
                UnitStats::from(base),
                Collider::from_size(Vec2::from(preset.body_size)),
                CollisionLayer::Enemy,
            ),
            (
                AIState::default(),
                AIConfig::from(preset),
                Wander::new(wander_origin),
                AttackCooldown::new(preset.attack_cooldown),
                HurtFlash::new(Tint::Black),
            ),
        ))
        .id();

    crate::log(&format!(
        "{} initialized at {:.0} health and {:.0} damage",
        label, base.health, base.damage
    ));

    entity
}

/// Spawns everything the layout describes. Enemies with an unknown preset
/// are skipped with a warning.
pub fn spawn_level(commands: &mut Commands, config: &GameConfig, layout: &LevelLayout) -> LevelSpawnReport {
    let mut report = LevelSpawnReport::default();

    for wall in &layout.walls {
        commands.spawn((
            wall_bundle(Vec2::from(wall.center), Vec2::from(wall.size)),
            LevelEntity,
            Name::new("Wall"),
        ));
        report.walls += 1;
    }

    report.player = Some(spawn_player(commands, &config.player, Vec2::from(layout.player_spawn)));

    for (index, spawn) in layout.enemies.iter().enumerate() {
        let Some(preset) = config.enemy_presets.get(&spawn.preset) else {
            crate::log_warning(&format!(
                "Level '{}': unknown enemy preset '{}', skipped",
                layout.name, spawn.preset
            ));
            continue;
        };

        let position = Vec2::from(spawn.position);
        let origin = spawn.wander_origin.map(Vec2::from).unwrap_or(position);
        let label = format!("{} #{}", spawn.preset, index);
        spawn_enemy(commands, &label, preset, position, origin);
        report.enemies += 1;
    }

    crate::log_info(&format!(
        "🗺️ Level '{}' spawned: {} enemies, {} walls",
        layout.name, report.enemies, report.walls
    ));

    report
}
