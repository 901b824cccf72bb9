//! Input systems.
//!
//! [`update_input_state`] reads the keyboard from Raylib once per frame and
//! advances [`InputState`], which keeps the previous and current held sets
//! for edge detection.
use bevy_ecs::prelude::*;
use raylib::ffi::KeyboardKey;

use crate::resources::input::{GameKey, InputState};

/// Raylib key behind each game key.
pub fn key_binding(key: GameKey) -> KeyboardKey {
    match key {
        GameKey::Q => KeyboardKey::KEY_Q,
        GameKey::W => KeyboardKey::KEY_W,
        GameKey::E => KeyboardKey::KEY_E,
        GameKey::S => KeyboardKey::KEY_S,
        GameKey::D => KeyboardKey::KEY_D,
        GameKey::I => KeyboardKey::KEY_I,
        GameKey::O => KeyboardKey::KEY_O,
        GameKey::P => KeyboardKey::KEY_P,
        GameKey::J => KeyboardKey::KEY_J,
        GameKey::K => KeyboardKey::KEY_K,
        GameKey::M => KeyboardKey::KEY_M,
        GameKey::Enter => KeyboardKey::KEY_ENTER,
        GameKey::Escape => KeyboardKey::KEY_ESCAPE,
    }
}

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(mut input: ResMut<InputState>, rl: NonSend<raylib::RaylibHandle>) {
    let held = GameKey::ALL
        .into_iter()
        .filter(|key| rl.is_key_down(key_binding(*key)));
    input.advance(held);
}
