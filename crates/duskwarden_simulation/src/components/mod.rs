//! ECS components for gameplay entities
//!
//! Organized by domain:
//! - actor: unit markers and state (Player, Enemy, UnitState, Respawnable, Dead)
//! - stats: health/damage tracking (UnitStats, BaseStats)
//! - movement: desired velocity and dash (MovementController, Dash)
//! - world: colliders and walls (Collider, CollisionLayer, Wall)

pub mod actor;
pub mod movement;
pub mod stats;
pub mod world;

pub use actor::*;
pub use movement::*;
pub use stats::*;
pub use world::*;
