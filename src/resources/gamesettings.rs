//! Global gameplay settings and arena geometry.
//!
//! All physics constants are tuned per tick (one tick per rendered frame),
//! not per second. They are read when a session is built and stay immutable
//! while it runs.

/// Arena width in pixels.
pub const ARENA_WIDTH: f32 = 1000.0;
/// Arena height in pixels.
pub const ARENA_HEIGHT: f32 = 600.0;
/// Height of the floor strip at the bottom of the arena.
pub const FLOOR_MARGIN: f32 = 50.0;

const DEFAULT_GRAVITY: f32 = 0.8;
const DEFAULT_JUMP_FORCE: f32 = -15.0;
const DEFAULT_MOVE_SPEED: f32 = 5.0;
const DEFAULT_PUNCH_DAMAGE: i32 = 5;
const DEFAULT_KICK_DAMAGE: i32 = 8;
const DEFAULT_MAX_HEALTH: i32 = 100;

/// Tunable gameplay constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSettings {
    /// Downward acceleration added to `vy` every tick.
    pub gravity: f32,
    /// Initial `vy` of a jump (negative is up).
    pub jump_force: f32,
    /// Horizontal speed while a move key is held.
    pub move_speed: f32,
    pub punch_damage: i32,
    pub kick_damage: i32,
    pub max_health: i32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            jump_force: DEFAULT_JUMP_FORCE,
            move_speed: DEFAULT_MOVE_SPEED,
            punch_damage: DEFAULT_PUNCH_DAMAGE,
            kick_damage: DEFAULT_KICK_DAMAGE,
            max_health: DEFAULT_MAX_HEALTH,
        }
    }
}
