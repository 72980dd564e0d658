//! Damage application and death handling.
//!
//! 1. Attackers write [`DamageRequest`] (melee hit, projectile hit)
//! 2. `apply_damage` applies each request to `UnitStats` exactly once
//! 3. The application that takes a unit to zero emits [`EntityDied`] and marks it `Dead`
//! 4. `handle_deaths` respawns `Respawnable` units, despawns everything else

use bevy::prelude::*;

use crate::combat::{HurtFlash, Knockback};
use crate::components::{
    BaseStats, DamageOutcome, Dead, MovementController, Respawnable, UnitState, UnitStats,
};

/// Where a hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum DamageSource {
    Melee,
    Ranged,
}

/// Event: apply `amount` damage to `target`.
#[derive(Event, Debug, Clone)]
pub struct DamageRequest {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub amount: f32,
    pub source: DamageSource,
}

/// Event: damage was applied (UI, flash, sounds).
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub amount: f32,
    pub remaining_health: f32,
    pub source: DamageSource,
    pub target_died: bool,
}

/// Event: a unit's health reached zero.
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Event: a respawnable unit died and was restored at its spawn point.
#[derive(Event, Debug, Clone)]
pub struct PlayerRespawned {
    pub entity: Entity,
    pub position: Vec2,
}

/// Human-readable label for logs.
pub fn entity_label(entity: Entity, name: Option<&Name>) -> String {
    match name {
        Some(name) => format!("{} ({:?})", name.as_str(), entity),
        None => format!("{:?}", entity),
    }
}

/// System: apply queued damage requests.
pub fn apply_damage(
    mut commands: Commands,
    mut requests: EventReader<DamageRequest>,
    mut dealt_events: EventWriter<DamageDealt>,
    mut died_events: EventWriter<EntityDied>,
    mut targets: Query<(&mut UnitStats, Option<&Name>), Without<Dead>>,
) {
    for request in requests.read() {
        let Ok((mut stats, name)) = targets.get_mut(request.target) else {
            crate::log_warning(&format!(
                "DamageRequest: target {:?} has no UnitStats (or is already dead), ignored",
                request.target
            ));
            continue;
        };

        let label = entity_label(request.target, name);
        crate::log(&format!("{} takes {:.0} damage", label, request.amount));

        let outcome = stats.take_damage(request.amount);
        let died = outcome == DamageOutcome::Died;

        crate::log(&format!("{} has {:.0} health left", label, stats.current_health));

        dealt_events.write(DamageDealt {
            attacker: request.attacker,
            target: request.target,
            amount: request.amount.max(0.0),
            remaining_health: stats.current_health,
            source: request.source,
            target_died: died,
        });

        if died {
            commands.entity(request.target).insert(Dead);
            died_events.write(EntityDied {
                entity: request.target,
                killer: request.attacker,
            });
            crate::log_info(&format!("☠️ {} died (killer: {:?})", label, request.attacker));
        }
    }
}

/// System: resolve deaths.
///
/// `Respawnable` units get base stats back, are moved to their spawn point and
/// lose `Dead`; every other dead unit is despawned.
pub fn handle_deaths(
    mut commands: Commands,
    mut died_events: EventReader<EntityDied>,
    mut respawnables: Query<(
        &mut UnitStats,
        &BaseStats,
        &Respawnable,
        &mut Transform,
        Option<&mut MovementController>,
        Option<&mut UnitState>,
    )>,
    mut respawned_events: EventWriter<PlayerRespawned>,
) {
    for event in died_events.read() {
        if let Ok((mut stats, base, respawnable, mut transform, movement, state)) =
            respawnables.get_mut(event.entity)
        {
            stats.reset_to(base);
            transform.translation.x = respawnable.spawn_point.x;
            transform.translation.y = respawnable.spawn_point.y;
            if let Some(mut movement) = movement {
                movement.stop();
            }
            if let Some(mut state) = state {
                *state = UnitState::default();
            }

            commands
                .entity(event.entity)
                .remove::<(Dead, Knockback)>();

            respawned_events.write(PlayerRespawned {
                entity: event.entity,
                position: respawnable.spawn_point,
            });
            crate::log_info(&format!(
                "🔁 {:?} respawned at {:?}",
                event.entity, respawnable.spawn_point
            ));
            continue;
        }

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.despawn();
            crate::log(&format!("Despawned dead entity {:?}", event.entity));
        }
    }
}

/// System: hurt flash on every applied hit (flash already running is kept).
pub fn flash_on_damage(mut dealt_events: EventReader<DamageDealt>, mut flashes: Query<&mut HurtFlash>) {
    for event in dealt_events.read() {
        if event.target_died {
            continue;
        }
        if let Ok(mut flash) = flashes.get_mut(event.target) {
            flash.start();
        }
    }
}
