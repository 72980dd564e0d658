//! Tests for enemy AI components.

#[cfg(test)]
mod tests {
    use super::super::fsm::{AIConfig, AIState, Wander};
    use crate::config::{AttackStyle, EnemyConfig};
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_ai_state_default() {
        let state = AIState::default();
        assert!(matches!(state, AIState::Wandering));
        assert_eq!(state.target(), None);
    }

    #[test]
    fn test_ai_config_from_preset() {
        let preset = EnemyConfig {
            attack_style: AttackStyle::Ranged,
            sight_range: [3.0, 3.0],
            chase_range: [6.0, 6.0],
            range_spawn_offset: [0.0, 0.6],
            ..Default::default()
        };

        let config = AIConfig::from(&preset);
        assert_eq!(config.attack_style, AttackStyle::Ranged);
        assert_eq!(config.sight_range, Vec2::splat(3.0));
        assert_eq!(config.chase_range, Vec2::splat(6.0));
        assert_eq!(config.range_spawn_offset, Vec2::new(0.0, 0.6));
        assert_eq!(config.attack_range, 0.5);
        assert_eq!(config.wander_speed, 4.0);
        assert_eq!(config.chase_speed, 6.0);
    }

    #[test]
    fn test_wander_point_stays_in_zone() {
        let wander = Wander::new(Vec2::new(3.0, -2.0));
        let range = Vec2::new(6.0, 4.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..1000 {
            let point = wander.pick_point(range, &mut rng);
            assert!(point.x >= 0.0 && point.x <= 6.0, "x = {}", point.x);
            assert!(point.y >= -4.0 && point.y <= 0.0, "y = {}", point.y);
            assert!(wander.in_zone(point, range));
        }
    }

    #[test]
    fn test_zero_range_picks_origin() {
        let wander = Wander::new(Vec2::new(1.0, 1.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(wander.pick_point(Vec2::ZERO, &mut rng), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_in_zone_bounds() {
        let wander = Wander::new(Vec2::ZERO);
        let range = Vec2::splat(2.0);
        assert!(wander.in_zone(Vec2::new(1.0, -1.0), range));
        assert!(!wander.in_zone(Vec2::new(1.01, 0.0), range));
        assert!(!wander.in_zone(Vec2::new(0.0, -1.5), range));
    }
}
