//! Match end notification.
//!
//! The arena tick system triggers [`MatchOverEvent`] on the single tick a
//! versus match ends. [`observe_match_over`] arms [`PendingGameOver`]; the
//! game-over screen appears once its delay has run out (see
//! [`crate::systems::gameover::game_over_delay_system`]).

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::arena::MatchOutcome;

/// Real-time seconds between the KO latch and the game-over screen.
pub const GAME_OVER_DELAY: f32 = 1.0;

#[derive(Event, Debug, Clone)]
pub struct MatchOverEvent {
    pub outcome: MatchOutcome,
}

/// Result waiting to be shown.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PendingGameOver {
    pub outcome: Option<MatchOutcome>,
    /// Seconds left before switching to the game-over state.
    pub remaining: f32,
}

pub fn observe_match_over(trigger: On<MatchOverEvent>, mut pending: ResMut<PendingGameOver>) {
    if pending.outcome.is_some() {
        debug!("match already over, ignoring second MatchOverEvent");
        return;
    }
    pending.outcome = Some(trigger.event().outcome.clone());
    pending.remaining = GAME_OVER_DELAY;
}
