//! Game state polling and run conditions.

use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use bevy_ecs::prelude::*;

/// Trigger [`GameStateChangedEvent`] when a transition is pending.
pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

pub fn state_is_fighting(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Fighting)
}
