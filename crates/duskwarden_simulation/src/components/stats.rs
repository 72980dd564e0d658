//! Stat model: health/damage tracking for every unit.

use bevy::prelude::*;

/// Result of a single damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Unit still has health left (or was already dead).
    Survived,
    /// This application took the unit from alive to zero.
    Died,
}

/// Configured values a unit is created with and reset to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BaseStats {
    pub health: f32,
    pub damage: f32,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self { health: 5.0, damage: 1.0 }
    }
}

/// Live stat tracker consulted on combat resolution.
///
/// Invariant: 0 ≤ current_health ≤ max_health
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct UnitStats {
    pub current_health: f32,
    pub max_health: f32,
    pub damage: f32,
}

impl Default for UnitStats {
    fn default() -> Self {
        Self::new(5.0, 1.0)
    }
}

impl From<BaseStats> for UnitStats {
    fn from(base: BaseStats) -> Self {
        Self::new(base.health, base.damage)
    }
}

impl UnitStats {
    pub fn new(health: f32, damage: f32) -> Self {
        let health = health.max(0.0);
        Self {
            current_health: health,
            max_health: health,
            damage,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0.0
    }

    /// Applies `amount` damage, clamping health at zero.
    ///
    /// Negative amounts are treated as zero. Returns [`DamageOutcome::Died`]
    /// only for the application that crosses zero, so repeated hits on a
    /// dead unit never report a second death.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        let was_alive = self.is_alive();
        let amount = amount.max(0.0);

        self.current_health = (self.current_health - amount).max(0.0);

        if was_alive && !self.is_alive() {
            DamageOutcome::Died
        } else {
            DamageOutcome::Survived
        }
    }

    /// Health as a fraction of max (0..=1); 0 for a zero-max unit.
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            (self.current_health / self.max_health).clamp(0.0, 1.0)
        }
    }

    /// Restores health and damage to the configured base values.
    pub fn reset_to(&mut self, base: &BaseStats) {
        *self = Self::new(base.health, base.damage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_hits_of_one_kill_on_the_fifth() {
        let mut stats = UnitStats::new(5.0, 1.0);

        for hit in 1..=4 {
            assert_eq!(stats.take_damage(1.0), DamageOutcome::Survived, "hit {}", hit);
            assert!(stats.is_alive());
        }

        assert_eq!(stats.take_damage(1.0), DamageOutcome::Died);
        assert!(!stats.is_alive());
        assert_eq!(stats.current_health, 0.0);
    }

    #[test]
    fn test_death_reported_once() {
        let mut stats = UnitStats::new(2.0, 1.0);

        assert_eq!(stats.take_damage(10.0), DamageOutcome::Died);
        assert_eq!(stats.current_health, 0.0);

        // Overkill on a corpse
        assert_eq!(stats.take_damage(3.0), DamageOutcome::Survived);
        assert_eq!(stats.current_health, 0.0);
    }

    #[test]
    fn test_health_clamped_at_zero_for_any_damage() {
        for (health, damage) in [(5.0, 0.0), (5.0, 2.5), (5.0, 5.0), (5.0, 7.0), (0.5, 100.0)] {
            let mut stats = UnitStats::new(health, 1.0);
            stats.take_damage(damage);
            assert_eq!(stats.current_health, (health - damage).max(0.0));
        }
    }

    #[test]
    fn test_negative_damage_is_ignored() {
        let mut stats = UnitStats::new(5.0, 1.0);
        stats.take_damage(-3.0);
        assert_eq!(stats.current_health, 5.0);
    }

    #[test]
    fn test_reset_to_base() {
        let base = BaseStats { health: 8.0, damage: 2.0 };
        let mut stats = UnitStats::from(base);
        stats.take_damage(6.0);
        stats.damage = 10.0;

        stats.reset_to(&base);
        assert_eq!(stats, UnitStats::new(8.0, 2.0));
        assert_eq!(stats.health_fraction(), 1.0);
    }

    #[test]
    fn test_health_fraction() {
        let mut stats = UnitStats::new(4.0, 1.0);
        stats.take_damage(1.0);
        assert_eq!(stats.health_fraction(), 0.75);
    }
}
