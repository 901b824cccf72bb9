//! Identity and display configuration shared by fighters and the bag.
//!
//! Supplied once when a session is built and never reassigned afterwards.

use std::path::PathBuf;

use crate::components::tint::Tint;

/// Name, accent color and optional face image of a combatant.
#[derive(Debug, Clone, PartialEq)]
pub struct FighterConfig {
    pub name: String,
    pub color: Tint,
    /// Image drawn as the head (fighters) or target (bag). Placeholder when absent.
    pub face: Option<PathBuf>,
}

impl FighterConfig {
    pub fn new(name: impl Into<String>, color: Tint) -> Self {
        Self {
            name: name.into(),
            color,
            face: None,
        }
    }

    pub fn with_face(mut self, face: impl Into<PathBuf>) -> Self {
        self.face = Some(face.into());
        self
    }

    pub fn player_one() -> Self {
        Self::new("Player 1", Tint::new(0xef, 0x44, 0x44, 255))
    }

    pub fn player_two() -> Self {
        Self::new("Player 2", Tint::new(0x3b, 0x82, 0xf6, 255))
    }

    pub fn bag() -> Self {
        Self::new("Trainee", Tint::new(0xea, 0x58, 0x0c, 255))
    }
}
