//! Physics module
//!
//! Box-collider spatial queries (parry2d) and the movement controller.
//! No rigid bodies: units are kinematic and only walls block them.

use bevy::prelude::*;

pub mod movement;
pub mod query;

pub use movement::{apply_movement, move_with_collision, wall_samples};
pub use query::{boxes_intersect, cast_ray, overlap_box, segment_clear, ColliderSample, RayHit, SpatialQuery};

use crate::GameplaySet;

/// Physics Plugin: `apply_movement` in GameplaySet::Movement.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, apply_movement.in_set(GameplaySet::Movement));
    }
}
