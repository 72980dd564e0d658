//! Movement controller: desired velocity → collision-resolved position delta.
//!
//! Architecture:
//! - Behaviors (player input, enemy AI) only write `MovementController.desired_velocity`
//! - `apply_movement` integrates it once per fixed tick against wall colliders
//! - Blocked moves slide along the free axis (x first, then y)
//!
//! Units only collide with walls; units pass through each other.

use bevy::prelude::*;

use super::query::{boxes_intersect, ColliderSample};
use crate::components::{Collider, MovementController, UnitState, Wall};

/// Shrinks the mover's box so units resting flush against a wall can slide.
const SKIN: f32 = 1e-3;

/// Moves a box from `position` by `delta`, stopping at walls.
///
/// Tries the full delta, then the x component alone, then y alone. A box
/// that already overlaps a wall moves freely so it can get out.
pub fn move_with_collision(position: Vec2, half_extents: Vec2, delta: Vec2, walls: &[ColliderSample]) -> Vec2 {
    if delta == Vec2::ZERO {
        return position;
    }

    let half = (half_extents - Vec2::splat(SKIN)).max(Vec2::ZERO);
    let blocked = |p: Vec2| {
        walls
            .iter()
            .any(|w| boxes_intersect(p, half, w.center, w.half_extents))
    };

    if blocked(position) {
        return position + delta;
    }

    let full = position + delta;
    if !blocked(full) {
        return full;
    }

    let x_only = position + Vec2::new(delta.x, 0.0);
    if delta.x != 0.0 && !blocked(x_only) {
        return x_only;
    }

    let y_only = position + Vec2::new(0.0, delta.y);
    if delta.y != 0.0 && !blocked(y_only) {
        return y_only;
    }

    position
}

/// Collects every wall collider.
pub fn wall_samples<'a>(
    walls: impl IntoIterator<Item = (Entity, &'a Transform, &'a Collider)>,
) -> Vec<ColliderSample> {
    walls
        .into_iter()
        .map(|(entity, transform, collider)| ColliderSample {
            entity,
            center: transform.translation.truncate(),
            half_extents: collider.half_extents,
        })
        .collect()
}

/// System: integrate desired velocity into `Transform`.
///
/// Stunned units ignore their desired velocity (knockback moves them instead).
pub fn apply_movement(
    mut movers: Query<(&mut Transform, &MovementController, &UnitState, Option<&Collider>), Without<Wall>>,
    walls: Query<(Entity, &Transform, &Collider), With<Wall>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }

    let walls = wall_samples(walls.iter());

    for (mut transform, controller, state, collider) in movers.iter_mut() {
        if !state.is_clear() || controller.desired_velocity == Vec2::ZERO {
            continue;
        }

        let position = transform.translation.truncate();
        let step = controller.desired_velocity * delta;

        let new_position = match collider {
            Some(collider) => move_with_collision(position, collider.half_extents, step, &walls),
            None => position + step,
        };

        transform.translation.x = new_position.x;
        transform.translation.y = new_position.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(index: u32, center: Vec2, size: Vec2) -> ColliderSample {
        ColliderSample {
            entity: Entity::from_raw(index),
            center,
            half_extents: size * 0.5,
        }
    }

    #[test]
    fn test_free_move() {
        let moved = move_with_collision(Vec2::ZERO, Vec2::splat(0.5), Vec2::new(1.0, 1.0), &[]);
        assert_eq!(moved, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_wall_blocks_and_slides() {
        // Vertical wall to the right at x = 1.5 (spans 1.0..2.0)
        let walls = [wall(1, Vec2::new(1.5, 0.0), Vec2::new(1.0, 10.0))];

        // Straight into the wall: blocked
        let moved = move_with_collision(Vec2::ZERO, Vec2::splat(0.5), Vec2::new(0.8, 0.0), &walls);
        assert_eq!(moved, Vec2::ZERO);

        // Diagonal: slides along y
        let moved = move_with_collision(Vec2::ZERO, Vec2::splat(0.5), Vec2::new(0.8, 0.3), &walls);
        assert_eq!(moved, Vec2::new(0.0, 0.3));
    }

    #[test]
    fn test_flush_against_wall_can_slide() {
        // Unit's right edge exactly touches the wall's left edge
        let walls = [wall(1, Vec2::new(1.0, 0.0), Vec2::new(1.0, 10.0))];
        let moved = move_with_collision(Vec2::ZERO, Vec2::splat(0.5), Vec2::new(0.0, 1.0), &walls);
        assert_eq!(moved, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_stuck_inside_wall_can_escape() {
        let walls = [wall(1, Vec2::ZERO, Vec2::splat(4.0))];
        let moved = move_with_collision(Vec2::ZERO, Vec2::splat(0.5), Vec2::new(-1.0, 0.0), &walls);
        assert_eq!(moved, Vec2::new(-1.0, 0.0));
    }
}
