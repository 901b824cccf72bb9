//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame with the window's frame delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is the frame delta in seconds; negative values are treated as zero.
pub fn update_world_time(world: &mut World, dt: f32) {
    let dt = dt.max(0.0);
    let mut wt = world.resource_mut::<WorldTime>();
    wt.elapsed += dt;
    wt.delta = dt;
}
