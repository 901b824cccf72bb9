//! Simulation entities and their building blocks.
//!
//! These are plain data types owned by a session (see
//! [`crate::resources::arena`]), not ECS components attached to entities:
//! a fight has a handful of entities with a strict update order.
//!
//! Submodules overview:
//! - [`fighter`] – fighter physics, charge and attack state machine
//! - [`fighterconfig`] – name, accent color and face image of a combatant
//! - [`hitbox`] – axis-aligned box and the overlap test
//! - [`particle`] – impact particles
//! - [`punchingbag`] – pendulum bag for practice sessions
//! - [`tint`] – RGBA color parsed from hex tokens

pub mod fighter;
pub mod fighterconfig;
pub mod hitbox;
pub mod particle;
pub mod punchingbag;
pub mod tint;
