//! ECS resources made available to systems.
//!
//! Overview
//! - `arena` – the running versus match or practice session and how to build it
//! - `audio` – bridge and channels for the background audio thread, mute policy
//! - `commentary` – post-match commentary worker bridge and text
//! - `faces` – face textures loaded at startup
//! - `gameconfig` – INI backed configuration
//! - `gamesettings` – physics and damage constants for a session
//! - `gamestate` – authoritative and pending high-level game state
//! - `input` – keyboard edge detector and control schemes
//! - `systemsstore` – registry of dynamically-lookup-able systems by name
//! - `worldtime` – frame time and delta
pub mod arena;
pub mod audio;
pub mod commentary;
pub mod faces;
pub mod gameconfig;
pub mod gamesettings;
pub mod gamestate;
pub mod input;
pub mod systemsstore;
pub mod worldtime;
