//! Frame time bookkeeping.
//!
//! The simulation is tick based and ignores this; it drives real-time
//! delays such as the pause before the game-over screen and HUD animation.
use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
}
