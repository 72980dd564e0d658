//! Gameplay configuration (RON).
//!
//! Every tunable number of the gameplay layer lives here: player combat,
//! enemy presets (referenced by name from level layouts) and the level
//! layouts themselves. Defaults reproduce the stock tuning, so a partial RON
//! file only needs the fields it changes.
//!
//! Vectors are stored as `[f32; 2]` so the config does not depend on glam's
//! serde feature.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Enemy attack style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum AttackStyle {
    /// Damage the target directly once in range.
    #[default]
    Melee,
    /// Spawn a projectile flying at the target.
    Ranged,
}

/// Player tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub health: f32,
    pub damage: f32,
    /// Units per second.
    pub move_speed: f32,
    /// Long side of the melee attack rectangle.
    pub attack_length: f32,
    /// Short side of the melee attack rectangle.
    pub attack_width: f32,
    /// Full size of the player's collider.
    pub body_size: [f32; 2],
    pub dash_speed_multiplier: f32,
    /// Seconds.
    pub dash_duration: f32,
    /// Seconds.
    pub dash_cooldown: f32,
    /// Stun seconds applied to enemies hit by melee (0 = no knockback).
    pub knockback_power: f32,
    /// Respawn at the level's spawn point instead of being destroyed.
    pub respawn: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            health: 5.0,
            damage: 1.0,
            move_speed: 5.0,
            attack_length: 2.5,
            attack_width: 1.0,
            body_size: [1.0, 1.0],
            dash_speed_multiplier: 3.0,
            dash_duration: 0.15,
            dash_cooldown: 0.6,
            knockback_power: 0.0,
            respawn: true,
        }
    }
}

/// Enemy tuning (one preset per enemy kind).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub health: f32,
    pub damage: f32,
    pub attack_style: AttackStyle,
    /// Center distance at which the enemy attacks.
    pub attack_range: f32,
    /// Seconds between attacks.
    pub attack_cooldown: f32,
    /// Projectile spawn point relative to the enemy (ranged only).
    pub range_spawn_offset: [f32; 2],
    pub projectile_speed: f32,
    /// Seconds before an unblocked projectile despawns.
    pub projectile_lifetime: f32,
    pub wander_speed: f32,
    pub can_wander: bool,
    /// Full size of the wander zone around the wander origin.
    pub wander_range: [f32; 2],
    pub acceptance_range: f32,
    /// Seconds to wait after reaching a wander point.
    pub wander_delay: f32,
    pub chase_speed: f32,
    /// Full size of the detection box used while wandering.
    pub sight_range: [f32; 2],
    /// Full size of the detection box used while chasing.
    pub chase_range: [f32; 2],
    /// Full size of the enemy's collider.
    pub body_size: [f32; 2],
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            health: 5.0,
            damage: 1.0,
            attack_style: AttackStyle::Melee,
            attack_range: 0.5,
            attack_cooldown: 0.5,
            range_spawn_offset: [0.0, 0.0],
            projectile_speed: 15.0,
            projectile_lifetime: 3.0,
            wander_speed: 4.0,
            can_wander: true,
            wander_range: [6.0, 6.0],
            acceptance_range: 0.1,
            wander_delay: 1.5,
            chase_speed: 6.0,
            sight_range: [6.0, 6.0],
            chase_range: [10.0, 10.0],
            body_size: [1.0, 1.0],
        }
    }
}

/// One enemy placed in a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Key into [`GameConfig::enemy_presets`].
    pub preset: String,
    pub position: [f32; 2],
    /// Defaults to `position`.
    #[serde(default)]
    pub wander_origin: Option<[f32; 2]>,
}

/// One static wall box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSpawn {
    pub center: [f32; 2],
    pub size: [f32; 2],
}

/// A named level: what gets spawned on load and on restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub name: String,
    pub player_spawn: [f32; 2],
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub walls: Vec<WallSpawn>,
}

/// Root config document.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub enemy_presets: HashMap<String, EnemyConfig>,
    pub levels: Vec<LevelLayout>,
    pub start_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        let mut enemy_presets = HashMap::new();
        enemy_presets.insert("grunt".to_string(), EnemyConfig::default());
        enemy_presets.insert(
            "archer".to_string(),
            EnemyConfig {
                attack_style: AttackStyle::Ranged,
                attack_range: 5.0,
                attack_cooldown: 1.5,
                range_spawn_offset: [0.0, 0.6],
                ..EnemyConfig::default()
            },
        );

        Self {
            player: PlayerConfig::default(),
            enemy_presets,
            levels: vec![LevelLayout {
                name: "arena".to_string(),
                player_spawn: [0.0, 0.0],
                enemies: vec![
                    EnemySpawn {
                        preset: "grunt".to_string(),
                        position: [8.0, 0.0],
                        wander_origin: None,
                    },
                    EnemySpawn {
                        preset: "archer".to_string(),
                        position: [-8.0, 4.0],
                        wander_origin: None,
                    },
                ],
                walls: vec![
                    WallSpawn { center: [0.0, 10.0], size: [24.0, 1.0] },
                    WallSpawn { center: [0.0, -10.0], size: [24.0, 1.0] },
                    WallSpawn { center: [12.0, 0.0], size: [1.0, 20.0] },
                    WallSpawn { center: [-12.0, 0.0], size: [1.0, 20.0] },
                ],
            }],
            start_level: "arena".to_string(),
        }
    }
}

/// Config loading/validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl GameConfig {
    /// Parses and validates a RON document.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    /// Serializes the config back to pretty RON.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    pub fn level(&self, name: &str) -> Option<&LevelLayout> {
        self.levels.iter().find(|level| level.name == name)
    }

    /// Checks cross references and value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let player = &self.player;
        check_positive("player.health", player.health)?;
        check_non_negative("player.damage", player.damage)?;
        check_non_negative("player.move_speed", player.move_speed)?;
        check_non_negative("player.attack_length", player.attack_length)?;
        check_non_negative("player.attack_width", player.attack_width)?;
        check_size("player.body_size", player.body_size)?;
        check_non_negative("player.dash_duration", player.dash_duration)?;
        check_non_negative("player.dash_cooldown", player.dash_cooldown)?;
        check_non_negative("player.knockback_power", player.knockback_power)?;

        for (name, enemy) in &self.enemy_presets {
            let field = |f: &str| format!("enemy_presets.{}.{}", name, f);
            check_positive(&field("health"), enemy.health)?;
            check_non_negative(&field("damage"), enemy.damage)?;
            check_non_negative(&field("attack_range"), enemy.attack_range)?;
            check_non_negative(&field("attack_cooldown"), enemy.attack_cooldown)?;
            check_non_negative(&field("projectile_speed"), enemy.projectile_speed)?;
            check_non_negative(&field("projectile_lifetime"), enemy.projectile_lifetime)?;
            check_non_negative(&field("wander_speed"), enemy.wander_speed)?;
            check_non_negative(&field("acceptance_range"), enemy.acceptance_range)?;
            check_non_negative(&field("wander_delay"), enemy.wander_delay)?;
            check_non_negative(&field("chase_speed"), enemy.chase_speed)?;
            check_size(&field("wander_range"), enemy.wander_range)?;
            check_size(&field("sight_range"), enemy.sight_range)?;
            check_size(&field("chase_range"), enemy.chase_range)?;
            check_size(&field("body_size"), enemy.body_size)?;
        }

        for level in &self.levels {
            for spawn in &level.enemies {
                if !self.enemy_presets.contains_key(&spawn.preset) {
                    return Err(ConfigError::Invalid(format!(
                        "level '{}' references unknown enemy preset '{}'",
                        level.name, spawn.preset
                    )));
                }
            }
            for wall in &level.walls {
                check_size(&format!("level '{}' wall size", level.name), wall.size)?;
            }
        }

        if self.level(&self.start_level).is_none() {
            return Err(ConfigError::Invalid(format!(
                "start_level '{}' is not defined",
                self.start_level
            )));
        }

        Ok(())
    }
}

fn check_non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} must be a finite value >= 0 (got {})", field, value)))
    }
}

fn check_positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} must be a finite value > 0 (got {})", field, value)))
    }
}

fn check_size(field: &str, size: [f32; 2]) -> Result<(), ConfigError> {
    check_non_negative(field, size[0])?;
    check_non_negative(field, size[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.player.health, 5.0);
        assert_eq!(config.player.attack_length, 2.5);
        assert_eq!(config.enemy_presets["grunt"].attack_cooldown, 0.5);
        assert_eq!(config.enemy_presets["archer"].attack_style, AttackStyle::Ranged);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let source = r#"(
            player: (health: 12.0),
            enemy_presets: {
                "slime": (chase_speed: 2.0),
            },
            levels: [
                (
                    name: "cave",
                    player_spawn: (1.0, 2.0),
                    enemies: [(preset: "slime", position: (4.0, 0.0))],
                ),
            ],
            start_level: "cave",
        )"#;

        let config = GameConfig::from_ron_str(source).expect("config should parse");
        assert_eq!(config.player.health, 12.0);
        assert_eq!(config.player.damage, 1.0);
        assert_eq!(config.enemy_presets["slime"].chase_speed, 2.0);
        assert_eq!(config.enemy_presets["slime"].wander_speed, 4.0);

        let cave = config.level("cave").expect("level exists");
        assert_eq!(cave.player_spawn, [1.0, 2.0]);
        assert_eq!(cave.enemies[0].wander_origin, None);
        assert!(cave.walls.is_empty());
    }

    #[test]
    fn test_unknown_preset_is_rejected() {
        let mut config = GameConfig::default();
        config.levels[0].enemies.push(EnemySpawn {
            preset: "dragon".to_string(),
            position: [0.0, 0.0],
            wander_origin: None,
        });

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("dragon"));
    }

    #[test]
    fn test_negative_range_is_rejected() {
        let mut config = GameConfig::default();
        if let Some(grunt) = config.enemy_presets.get_mut("grunt") {
            grunt.sight_range = [-1.0, 3.0];
        }
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_start_level_is_rejected() {
        let config = GameConfig {
            start_level: "nowhere".to_string(),
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = GameConfig::from_ron_str("(player: (health: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_nan_health_is_rejected() {
        let err = GameConfig::from_ron_str("(player: (health: NaN))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("player.health"));

        let mut config = GameConfig::default();
        if let Some(grunt) = config.enemy_presets.get_mut("grunt") {
            grunt.health = f32::NAN;
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("enemy_presets.grunt.health"));
    }

    #[test]
    fn test_missing_file_keeps_io_source() {
        let err = GameConfig::load("/nonexistent/duskwarden/game.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("failed to read config"));
    }

    #[test]
    fn test_pretty_output_parses_back() {
        let config = GameConfig::default();
        let text = config.to_ron_string().expect("serialize");
        let parsed = GameConfig::from_ron_str(&text).expect("parse back");
        assert_eq!(parsed, config);
    }
}
