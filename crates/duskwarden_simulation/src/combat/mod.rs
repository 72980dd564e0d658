//! Combat module
//!
//! - Stats rules: damage application, death, respawn (damage.rs)
//! - Attack pacing: cooldown gate (attacker.rs)
//! - Hit reactions: hurt flash, knockback (effects.rs)
//! - Enemy projectiles (projectile.rs)
//!
//! Attackers (player melee, enemy AI, projectiles) never touch `UnitStats`
//! directly: they write `DamageRequest` and `apply_damage` resolves it.

use bevy::prelude::*;

use crate::GameplaySet;

pub mod attacker;
pub mod damage;
pub mod effects;
pub mod projectile;

pub use attacker::{tick_attack_cooldowns, AttackCooldown};
pub use damage::{
    apply_damage, entity_label, handle_deaths, DamageDealt, DamageRequest, DamageSource, EntityDied,
    PlayerRespawned,
};
pub use effects::{HurtFlash, Knockback, KnockbackRequest, Tint};
pub use projectile::{spawn_projectile, EnemyProjectile, PROJECTILE_SIZE};

/// Combat Plugin
///
/// Execution order (FixedUpdate):
/// 1. Timers: attack cooldowns, hurt flashes
/// 2. Movement: projectiles fly and hit
/// 3. Damage: apply_damage → handle_deaths
/// 4. Reactions: hurt flash, knockback start, knockback pushes
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<PlayerRespawned>()
            .add_event::<KnockbackRequest>();

        app.add_systems(
            FixedUpdate,
            (
                (tick_attack_cooldowns, effects::tick_hurt_flash).in_set(GameplaySet::Timers),
                projectile::move_projectiles.in_set(GameplaySet::Movement),
                (apply_damage, handle_deaths).chain().in_set(GameplaySet::Damage),
                (
                    damage::flash_on_damage,
                    effects::start_knockback,
                    effects::tick_knockback,
                )
                    .chain()
                    .in_set(GameplaySet::Reactions),
            ),
        );
    }
}
