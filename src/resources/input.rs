//! Keyboard edge detector.
//!
//! [`InputState`] keeps the set of held keys from the previous and the
//! current tick. The window layer calls [`InputState::advance`] exactly once
//! per tick with every [`GameKey`] it sees held; everything else only queries.
//! Edges are computed from the diff, so a press shorter than one tick is
//! never reported and a key held across many ticks reports `just_pressed`
//! only once.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

/// Keys the game listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    Q,
    W,
    E,
    S,
    D,
    I,
    O,
    P,
    J,
    K,
    M,
    Enter,
    Escape,
}

impl GameKey {
    pub const ALL: [GameKey; 13] = [
        GameKey::Q,
        GameKey::W,
        GameKey::E,
        GameKey::S,
        GameKey::D,
        GameKey::I,
        GameKey::O,
        GameKey::P,
        GameKey::J,
        GameKey::K,
        GameKey::M,
        GameKey::Enter,
        GameKey::Escape,
    ];
}

/// Held keys for this tick and the one before.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    previous: FxHashSet<GameKey>,
    current: FxHashSet<GameKey>,
}

impl InputState {
    /// Shift the current set into the previous slot and store `held` as the
    /// new current set.
    pub fn advance<I>(&mut self, held: I)
    where
        I: IntoIterator<Item = GameKey>,
    {
        std::mem::swap(&mut self.previous, &mut self.current);
        self.current.clear();
        self.current.extend(held);
    }

    pub fn pressed(&self, key: GameKey) -> bool {
        self.current.contains(&key)
    }

    pub fn just_pressed(&self, key: GameKey) -> bool {
        self.current.contains(&key) && !self.previous.contains(&key)
    }

    pub fn just_released(&self, key: GameKey) -> bool {
        !self.current.contains(&key) && self.previous.contains(&key)
    }
}

/// Key bindings of one fighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlScheme {
    pub left: GameKey,
    pub right: GameKey,
    pub jump: GameKey,
    pub punch: GameKey,
    pub kick: GameKey,
}

impl ControlScheme {
    /// Q/E move, W jump, S punch, D kick.
    pub fn player_one() -> Self {
        Self {
            left: GameKey::Q,
            right: GameKey::E,
            jump: GameKey::W,
            punch: GameKey::S,
            kick: GameKey::D,
        }
    }

    /// I/P move, O jump, J punch, K kick.
    pub fn player_two() -> Self {
        Self {
            left: GameKey::I,
            right: GameKey::P,
            jump: GameKey::O,
            punch: GameKey::J,
            kick: GameKey::K,
        }
    }
}
