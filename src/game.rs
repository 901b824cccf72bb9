//! State enter hooks.
//!
//! Registered in [`crate::resources::systemsstore::SystemsStore`] under the
//! keys used by [`crate::events::gamestate::observe_gamestate_change_event`]
//! and run through `commands.run_system` when the state changes.

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::events::matchover::PendingGameOver;
use crate::resources::arena::SessionSetup;
use crate::resources::commentary::{Commentary, CommentaryBridge};
use crate::systems::commentary::request_commentary;

/// Build a fresh session from [`SessionSetup`]. Used for the first fight and
/// for every rematch.
pub fn enter_fight(
    mut commands: Commands,
    setup: Res<SessionSetup>,
    mut pending: ResMut<PendingGameOver>,
    commentary: Option<ResMut<Commentary>>,
) {
    commands.insert_resource(setup.build());
    *pending = PendingGameOver::default();
    if let Some(mut commentary) = commentary {
        // replies still in flight belong to the previous match
        commentary.invalidate();
    }
    info!("fight! ({:?})", setup.mode);
}

/// Ask for commentary on the match that just ended.
pub fn enter_game_over(
    pending: Res<PendingGameOver>,
    commentary: Option<ResMut<Commentary>>,
    bridge: Option<Res<CommentaryBridge>>,
) {
    let Some(outcome) = pending.outcome.as_ref() else {
        warn!("entered game over without a match result");
        return;
    };
    match (commentary, bridge) {
        (Some(mut commentary), Some(bridge)) => request_commentary(
            &mut commentary,
            &bridge,
            &outcome.winner_name,
            &outcome.loser_name,
        ),
        _ => warn!("commentary is not set up; skipping"),
    }
}

pub fn quit_game() {
    info!("quitting");
}
