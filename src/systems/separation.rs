//! Keeps two fighters from standing inside each other.

use crate::components::fighter::Fighter;

/// Closest horizontal distance allowed between two fighters' left edges.
pub const MIN_DISTANCE: f32 = 50.0;
/// Distance each fighter is pushed per tick while too close.
pub const PUSH_STEP: f32 = 2.0;

/// Push `p1` and `p2` apart when closer than [`MIN_DISTANCE`].
///
/// The fighter on the left moves left. On an exact tie `p1` moves right.
/// Wall clamping happens on the next [`Fighter::update`].
pub fn separate(p1: &mut Fighter, p2: &mut Fighter) {
    if (p1.x - p2.x).abs() >= MIN_DISTANCE {
        return;
    }
    if p1.x < p2.x {
        p1.x -= PUSH_STEP;
        p2.x += PUSH_STEP;
    } else {
        p1.x += PUSH_STEP;
        p2.x -= PUSH_STEP;
    }
}
