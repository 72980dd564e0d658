//! Player input events and keyboard bindings.
//!
//! Gameplay systems only consume [`PlayerInputEvent`]. When the host app has
//! an input plugin (`ButtonInput<KeyCode>` resource), `read_keyboard_input`
//! produces one event per frame from the bound keys; headless runs and tests
//! write the events directly.

use bevy::input::keyboard::KeyCode;
use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::session::SessionCommand;

/// Player input for one frame.
///
/// # Fields
/// - `move_direction`: WASD direction, normalized (`Vec2::ZERO` when idle)
/// - `attack`: attack key (just_pressed)
/// - `dash`: dash key (just_pressed)
///
/// `+y` is up (W), `+x` is right (D).
#[derive(Event, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInputEvent {
    pub move_direction: Vec2,
    pub attack: bool,
    pub dash: bool,
}

impl PlayerInputEvent {
    pub fn movement(direction: Vec2) -> Self {
        Self {
            move_direction: direction.normalize_or_zero(),
            ..Default::default()
        }
    }

    pub fn attack() -> Self {
        Self {
            attack: true,
            ..Default::default()
        }
    }
}

/// Key bindings.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InputBindings {
    pub up: KeyCode,
    pub left: KeyCode,
    pub down: KeyCode,
    pub right: KeyCode,
    pub attack: KeyCode,
    pub dash: KeyCode,
    pub restart: KeyCode,
    pub quit: KeyCode,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            up: KeyCode::KeyW,
            left: KeyCode::KeyA,
            down: KeyCode::KeyS,
            right: KeyCode::KeyD,
            attack: KeyCode::KeyJ,
            dash: KeyCode::Space,
            restart: KeyCode::KeyR,
            quit: KeyCode::Escape,
        }
    }
}

impl InputBindings {
    /// Builds this frame's player input from held/pressed keys.
    pub fn player_input(&self, keyboard: &ButtonInput<KeyCode>) -> PlayerInputEvent {
        let mut direction = Vec2::ZERO;
        if keyboard.pressed(self.up) {
            direction.y += 1.0;
        }
        if keyboard.pressed(self.down) {
            direction.y -= 1.0;
        }
        if keyboard.pressed(self.left) {
            direction.x -= 1.0;
        }
        if keyboard.pressed(self.right) {
            direction.x += 1.0;
        }

        PlayerInputEvent {
            move_direction: direction.normalize_or_zero(),
            attack: keyboard.just_pressed(self.attack),
            dash: keyboard.just_pressed(self.dash),
        }
    }
}

/// System (PreUpdate, after input): keyboard → PlayerInputEvent / SessionCommand.
pub fn read_keyboard_input(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<InputBindings>,
    mut input_events: EventWriter<PlayerInputEvent>,
    mut session_commands: EventWriter<SessionCommand>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    input_events.write(bindings.player_input(&keyboard));

    if keyboard.just_pressed(bindings.restart) {
        session_commands.write(SessionCommand::Restart);
    }
    if keyboard.just_pressed(bindings.quit) {
        session_commands.write(SessionCommand::Quit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_mapping() {
        let bindings = InputBindings::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();

        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::KeyD);
        keyboard.press(KeyCode::KeyJ);

        let input = bindings.player_input(&keyboard);
        let expected = Vec2::new(1.0, 1.0).normalize();
        assert!((input.move_direction - expected).length() < 1e-6);
        assert!(input.attack);
        assert!(!input.dash);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let bindings = InputBindings::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();

        keyboard.press(KeyCode::KeyA);
        keyboard.press(KeyCode::KeyD);

        assert_eq!(bindings.player_input(&keyboard).move_direction, Vec2::ZERO);
    }
}
