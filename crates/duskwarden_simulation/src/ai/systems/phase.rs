//! Phase: teleport an enemy next to the player.

use bevy::prelude::*;

use crate::components::{Collider, Dead, Enemy, MovementController, Player, Wall};
use crate::physics::boxes_intersect;

/// Offset along each moving axis for Front/Behind.
const PHASE_AXIS_OFFSET: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum PhaseStyle {
    Top,
    Bottom,
    Left,
    Right,
    /// Ahead of the player along its last movement
    Front,
    /// Behind the player along its last movement
    Behind,
}

/// Event: phase `enemy` next to the player.
#[derive(Event, Debug, Clone)]
pub struct PhaseRequest {
    pub enemy: Entity,
    pub style: PhaseStyle,
}

fn axis_offset(component: f32, sign: f32) -> f32 {
    if component != 0.0 {
        sign * PHASE_AXIS_OFFSET
    } else {
        0.0
    }
}

/// Destination for `style` given the player's position and last velocity.
pub fn phase_point(style: PhaseStyle, player_pos: Vec2, last_velocity: Vec2) -> Vec2 {
    match style {
        PhaseStyle::Top => player_pos + Vec2::Y,
        PhaseStyle::Bottom => player_pos - Vec2::Y,
        PhaseStyle::Left => player_pos - Vec2::X,
        PhaseStyle::Right => player_pos + Vec2::X,
        PhaseStyle::Front => {
            let v = last_velocity;
            let base = player_pos - v;
            base + Vec2::new(
                axis_offset(v.x, v.x.signum()),
                axis_offset(v.y, v.y.signum()),
            )
        }
        PhaseStyle::Behind => {
            let v = last_velocity;
            let base = player_pos + v;
            base + Vec2::new(
                axis_offset(v.x, -v.x.signum()),
                axis_offset(v.y, -v.y.signum()),
            )
        }
    }
}

/// System: apply phase requests (skipped when the body would touch a wall).
pub fn handle_phase_requests(
    mut requests: EventReader<PhaseRequest>,
    mut enemies: Query<(&mut Transform, Option<&Collider>), (With<Enemy>, Without<Dead>, Without<Player>, Without<Wall>)>,
    players: Query<(&Transform, &MovementController), (With<Player>, Without<Dead>, Without<Enemy>)>,
    walls: Query<(&Transform, &Collider), (With<Wall>, Without<Enemy>, Without<Player>)>,
) {
    for request in requests.read() {
        let Ok((player_transform, player_movement)) = players.single() else {
            crate::log_warning("PhaseRequest: no live player, ignored");
            continue;
        };

        let Ok((mut transform, collider)) = enemies.get_mut(request.enemy) else {
            crate::log_warning(&format!("PhaseRequest: {:?} is not a live enemy, ignored", request.enemy));
            continue;
        };

        let point = phase_point(
            request.style,
            player_transform.translation.truncate(),
            player_movement.last_velocity,
        );
        let half = collider.map(|c| c.half_extents).unwrap_or(Vec2::splat(0.5));

        let blocked = walls
            .iter()
            .any(|(t, c)| boxes_intersect(point, half, t.translation.truncate(), c.half_extents));
        if blocked {
            crate::log(&format!("PhaseRequest: {:?} → {:?} blocked by a wall", request.enemy, point));
            continue;
        }

        transform.translation.x = point.x;
        transform.translation.y = point.y;
        crate::log(&format!("✨ {:?} phased {:?} to {:?}", request.enemy, request.style, point));
    }
}
