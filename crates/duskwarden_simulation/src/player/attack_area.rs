//! Melee attack area geometry.
//!
//! The area is a box in front of the player along its last movement
//! direction: horizontal stance when the last velocity had an x component,
//! vertical otherwise.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum AttackStance {
    Horizontal,
    #[default]
    Vertical,
}

/// Attack box relative to the player's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackArea {
    pub stance: AttackStance,
    /// Box center offset from the player
    pub offset: Vec2,
    /// Full box size
    pub size: Vec2,
}

/// Sign with `sign(0) = +1`.
fn sign(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

impl AttackArea {
    pub fn from_last_velocity(last_velocity: Vec2, body_size: Vec2, length: f32, width: f32) -> Self {
        if last_velocity.x != 0.0 {
            let s = sign(last_velocity.x);
            Self {
                stance: AttackStance::Horizontal,
                offset: Vec2::new((length / 2.0) * s + (body_size.x / 2.0) * s, 0.0),
                size: Vec2::new(length, width),
            }
        } else {
            let s = sign(last_velocity.y);
            Self {
                stance: AttackStance::Vertical,
                offset: Vec2::new(0.0, (length / 2.0) * s + (body_size.y / 2.0) * s),
                size: Vec2::new(width, length),
            }
        }
    }

    /// World-space center for a player at `position`.
    pub fn center(&self, position: Vec2) -> Vec2 {
        position + self.offset
    }
}
