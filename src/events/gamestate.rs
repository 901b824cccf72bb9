//! Game state transition event and observer.
//!
//! Systems can request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. Emitting a [`GameStateChangedEvent`] then triggers the
//! observer in this module, which applies the transition to [`GameState`]
//! and invokes the appropriate enter/exit systems stored in
//! [`crate::resources::systemsstore::SystemsStore`].
//!
//! This decouples the intent to change state from the mechanics of running
//! setup/teardown systems and avoids borrowing conflicts.
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::SystemsStore;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
///
/// Emitting this event causes [`observe_gamestate_change_event`] to read
/// [`NextGameState`]. If it contains [`Pending`], the observer updates the
/// authoritative [`GameState`], runs exit/enter hooks, and clears the pending
/// value; if it is [`Unchanged`], nothing happens.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// Contract
/// - Reads the intention from [`NextGameState`].
/// - If pending, copies the new value into [`GameState`], then:
///   - calls state-specific exit hooks for the previous state
///   - calls state-specific enter hooks for the new state
///   - resets [`NextGameState`] to [`Unchanged`]
/// - If any required resource is missing, logs a diagnostic and returns.
///
/// The enter hooks are executed by looking up system IDs in
/// [`SystemsStore`] under well-known keys (`"enter_fight"`,
/// `"enter_game_over"`, `"quit_game"`).
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    systems_store: Res<SystemsStore>,
) {
    debug!("GameStateChangedEvent triggered");

    if let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    {
        let next_state_value = next_game_state.get().clone();
        match next_state_value {
            Pending(new_state) => {
                let old_state = game_state.get().clone();
                info!(
                    "Transitioning from {:?} to {:?}",
                    game_state.get(),
                    new_state
                );
                game_state.set(new_state.clone());
                next_game_state.reset();
                debug!("Calling on_state_exit()");
                on_state_exit(&old_state, &mut commands, &systems_store);
                debug!("Calling on_state_enter()");
                let systems_store = systems_store.as_ref();
                on_state_enter(&new_state, &mut commands, systems_store);
            }
            Unchanged => {
                debug!("No state change pending.");
            }
        }
    } else {
        warn!(
            "One or more resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}",
            next_game_state.is_some(),
            game_state.is_some()
        );
    }
}

/// Internal: run state-specific "enter" systems for the given state.
fn on_state_enter(state: &GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    let hook = match state {
        GameStates::None => {
            debug!("Entered None state");
            return;
        }
        GameStates::Fighting => "enter_fight",
        GameStates::GameOver => "enter_game_over",
        GameStates::Quitting => "quit_game",
    };
    match systems_store.get(hook) {
        Some(id) => commands.run_system(*id),
        None => warn!("No '{}' system registered in SystemsStore", hook),
    }
}

/// Internal: run state-specific "exit" systems for the given state.
fn on_state_exit(state: &GameStates, _commands: &mut Commands, _systems_store: &SystemsStore) {
    debug!("Exited {:?} state", state);
}
