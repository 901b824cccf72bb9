//! Face-Off library.
//!
//! Exposes the simulation core, ECS resources, systems and events so the
//! game can be driven headless from integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
