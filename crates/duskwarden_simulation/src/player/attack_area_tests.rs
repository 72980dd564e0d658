//! Tests for melee attack area geometry.

#[cfg(test)]
mod tests {
    use super::super::attack_area::{AttackArea, AttackStance};
    use bevy::prelude::*;

    const BODY: Vec2 = Vec2::ONE;

    #[test]
    fn test_horizontal_right() {
        let area = AttackArea::from_last_velocity(Vec2::new(5.0, 0.0), BODY, 2.5, 1.0);
        assert_eq!(area.stance, AttackStance::Horizontal);
        assert_eq!(area.size, Vec2::new(2.5, 1.0));
        assert_eq!(area.offset, Vec2::new(1.75, 0.0));
    }

    #[test]
    fn test_horizontal_wins_on_diagonal() {
        let area = AttackArea::from_last_velocity(Vec2::new(-3.0, 3.0), BODY, 2.5, 1.0);
        assert_eq!(area.stance, AttackStance::Horizontal);
        assert_eq!(area.offset, Vec2::new(-1.75, 0.0));
    }

    #[test]
    fn test_vertical_down() {
        let area = AttackArea::from_last_velocity(Vec2::new(0.0, -2.0), BODY, 2.5, 1.0);
        assert_eq!(area.stance, AttackStance::Vertical);
        assert_eq!(area.size, Vec2::new(1.0, 2.5));
        assert_eq!(area.offset, Vec2::new(0.0, -1.75));
    }

    #[test]
    fn test_never_moved_faces_up() {
        // sign(0) = +1
        let area = AttackArea::from_last_velocity(Vec2::ZERO, BODY, 2.5, 1.0);
        assert_eq!(area.stance, AttackStance::Vertical);
        assert_eq!(area.offset, Vec2::new(0.0, 1.75));
    }

    #[test]
    fn test_body_size_extends_offset() {
        let area = AttackArea::from_last_velocity(Vec2::X, Vec2::new(2.0, 1.0), 2.0, 1.0);
        assert_eq!(area.offset, Vec2::new(2.0, 0.0));
        assert_eq!(area.center(Vec2::new(1.0, 1.0)), Vec2::new(3.0, 1.0));
    }
}
