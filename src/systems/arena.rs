//! Per-frame simulation step.
//!
//! Advances the [`Arena`] once per frame with the current [`InputState`],
//! forwards the tick's sounds as [`SoundEvent`] messages and triggers
//! [`MatchOverEvent`] on the tick a versus match ends.

use bevy_ecs::prelude::*;

use crate::events::matchover::MatchOverEvent;
use crate::events::sound::SoundEvent;
use crate::resources::arena::Arena;
use crate::resources::input::InputState;

pub fn arena_tick_system(
    input: Res<InputState>,
    arena: Option<ResMut<Arena>>,
    mut sounds: MessageWriter<SoundEvent>,
    mut commands: Commands,
) {
    let Some(mut arena) = arena else {
        return;
    };
    let report = arena.tick(&input);
    sounds.write_batch(report.sounds);
    if let Some(outcome) = report.outcome {
        commands.trigger(MatchOverEvent { outcome });
    }
}
