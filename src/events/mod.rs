//! Event and message types exchanged across systems.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`gamestate`] – state transition notifications for the high-level game flow
//! - [`matchover`] – end of a versus match and the delayed game-over screen
//! - [`sound`] – named sound cues emitted by the simulation
pub mod audio;
pub mod gamestate;
pub mod matchover;
pub mod sound;
