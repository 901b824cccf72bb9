//! Global keys outside the fighters' controls.
//!
//! - `M` toggles mute.
//! - `Esc` quits (leaves practice, leaves the game-over screen).
//! - `Enter` on the game-over screen starts a rematch with the same setup.

use bevy_ecs::prelude::*;
use log::info;

use crate::resources::audio::AudioSettings;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::{GameKey, InputState};

pub fn hotkeys_system(
    input: Res<InputState>,
    state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
    mut audio: ResMut<AudioSettings>,
) {
    if input.just_pressed(GameKey::M) {
        audio.muted = !audio.muted;
        info!("sound {}", if audio.muted { "muted" } else { "on" });
    }

    if input.just_pressed(GameKey::Escape) {
        next_state.set(GameStates::Quitting);
    } else if input.just_pressed(GameKey::Enter) && *state.get() == GameStates::GameOver {
        next_state.set(GameStates::Fighting);
    }
}
