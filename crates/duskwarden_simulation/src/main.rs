//! Headless Duskwarden simulation
//!
//! Runs the configured start level without rendering or input.
//! Usage: `duskwarden_simulation [config.ron] [ticks]`

use bevy::prelude::*;
use duskwarden_simulation::{
    create_headless_app, log_error, log_info, ActiveLevel, Enemy, GameConfig, Player, SimulationPlugin, UnitStats,
};

const DEFAULT_TICKS: u32 = 1000;

fn main() {
    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Failed to load config '{}': {}", path, err));
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let ticks = args.next().and_then(|t| t.parse().ok()).unwrap_or(DEFAULT_TICKS);

    let seed = 42;
    let mut app = create_headless_app(seed);
    app.insert_resource(config).add_plugins(SimulationPlugin);

    log_info(&format!("Starting Duskwarden headless simulation (seed: {}, ticks: {})", seed, ticks));

    // Startup (level load)
    app.update();

    for tick in 0..ticks {
        app.update();

        if tick % 100 == 0 {
            let world = app.world_mut();
            let level = world
                .get_resource::<ActiveLevel>()
                .map(|l| l.name.clone())
                .unwrap_or_default();
            let enemies = world.query_filtered::<(), With<Enemy>>().iter(world).count();
            let player_health = world
                .query_filtered::<&UnitStats, With<Player>>()
                .iter(world)
                .next()
                .map(|s| s.current_health);

            log_info(&format!(
                "Tick {}: level '{}', {} enemies, player health {:?}",
                tick, level, enemies, player_health
            ));
        }
    }

    log_info("Simulation complete!");
}
