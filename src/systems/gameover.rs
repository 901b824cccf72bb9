//! Delay between the knockout and the game-over screen.

use bevy_ecs::prelude::*;
use log::debug;

use crate::events::matchover::PendingGameOver;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::worldtime::WorldTime;

/// Count down [`PendingGameOver::remaining`] and request
/// [`GameStates::GameOver`] once it runs out.
pub fn game_over_delay_system(
    time: Res<WorldTime>,
    mut pending: ResMut<PendingGameOver>,
    mut next_state: ResMut<NextGameState>,
) {
    if pending.outcome.is_none() || pending.remaining <= 0.0 {
        return;
    }
    pending.remaining -= time.delta;
    if pending.remaining <= 0.0 {
        pending.remaining = 0.0;
        debug!("game-over delay elapsed");
        next_state.set(GameStates::GameOver);
    }
}
