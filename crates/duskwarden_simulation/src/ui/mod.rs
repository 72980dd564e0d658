//! UI data layer (no rendering).
//!
//! - `DiaryView`: two text fields bound to a `DiaryData` record
//! - `PlayerHealthBar`: fill amount mirrored from the player's stats
//!
//! A presentation layer reads these; the simulation only writes them.

use bevy::prelude::*;

use crate::components::{Player, UnitStats};
use crate::GameplaySet;

/// A diary entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Reflect)]
pub struct DiaryData {
    pub title: String,
    pub text: String,
}

impl DiaryData {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Text widget showing one diary entry.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct DiaryView {
    pub title: String,
    pub text: String,
}

impl DiaryView {
    pub fn display(&mut self, data: &DiaryData) {
        self.title = data.title.clone();
        self.text = data.text.clone();
    }
}

/// Event: show `data` in the `view` widget.
#[derive(Event, Debug, Clone)]
pub struct ShowDiary {
    pub view: Entity,
    pub data: DiaryData,
}

pub fn display_diary(mut events: EventReader<ShowDiary>, mut views: Query<&mut DiaryView>) {
    for event in events.read() {
        let Ok(mut view) = views.get_mut(event.view) else {
            crate::log_warning(&format!("ShowDiary: {:?} has no DiaryView, ignored", event.view));
            continue;
        };
        view.display(&event.data);
    }
}

/// Player health bar fill (0..=1).
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct PlayerHealthBar {
    pub fill_amount: f32,
}

impl Default for PlayerHealthBar {
    fn default() -> Self {
        Self { fill_amount: 1.0 }
    }
}

/// System: mirror the player's health fraction into the health bar.
///
/// A destroyed player (no respawn) reads as an empty bar.
pub fn update_player_health_bar(players: Query<&UnitStats, With<Player>>, mut bar: ResMut<PlayerHealthBar>) {
    let fill_amount = players
        .iter()
        .next()
        .map(|stats| stats.health_fraction())
        .unwrap_or(0.0);
    if bar.fill_amount != fill_amount {
        bar.fill_amount = fill_amount;
    }
}

/// UI Plugin
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ShowDiary>()
            .init_resource::<PlayerHealthBar>();

        app.add_systems(Update, display_diary)
            .add_systems(FixedUpdate, update_player_health_bar.in_set(GameplaySet::Reactions));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_assigns_both_fields() {
        let mut view = DiaryView::default();
        view.display(&DiaryData::new("Day 1", "The gate is locked."));
        assert_eq!(view.title, "Day 1");
        assert_eq!(view.text, "The gate is locked.");

        view.display(&DiaryData::default());
        assert_eq!(view.title, "");
        assert_eq!(view.text, "");
    }
}
