//! Game systems.
//!
//! Submodules overview
//! - [`arena`] – advance the running session once per frame
//! - [`audio`] – bridge with the audio thread (poll/update message queues)
//! - [`combat`] – strike resolution and hit feedback
//! - [`commentary`] – commentary worker thread, requests and polling
//! - [`fightercontrol`] – map a control scheme onto one fighter
//! - [`gameover`] – delay before the game-over screen
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`hotkeys`] – mute, quit and rematch keys
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`render`] – draw the arena, HUD and game-over screen using Raylib
//! - [`separation`] – keep two fighters from overlapping
//! - [`sound`] – mute and pitch policy for sound cues
//! - [`time`] – update frame time and delta

pub mod arena;
pub mod audio;
pub mod combat;
pub mod commentary;
pub mod fightercontrol;
pub mod gameover;
pub mod gamestate;
pub mod hotkeys;
pub mod input;
pub mod render;
pub mod separation;
pub mod sound;
pub mod time;
