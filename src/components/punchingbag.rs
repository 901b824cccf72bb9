//! Pendulum punching bag for practice sessions.
//!
//! The bag hangs from a fixed pivot above the arena. Its state is a single
//! angle plus angular velocity; the drawn rectangle is derived from the angle
//! every tick and never written from outside.
//!
//! Per tick:
//!
//! ```text
//! ω += -g · sin θ
//! ω *= friction
//! θ += ω
//! ```

use crate::components::fighterconfig::FighterConfig;
use crate::components::hitbox::Hitbox;
use crate::resources::gamesettings::ARENA_WIDTH;

pub const BAG_WIDTH: f32 = 80.0;
pub const BAG_HEIGHT: f32 = 180.0;
/// Ticks of flash/jitter after a strike.
pub const BAG_HIT_TICKS: u32 = 10;

/// Tunable pendulum constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumParams {
    /// Restoring torque coefficient.
    pub gravity: f32,
    /// Angular velocity multiplier applied every tick (`< 1`).
    pub friction: f32,
    /// Distance from pivot to the bag's bottom edge.
    pub tether_length: f32,
    /// Converts strike force into angular velocity.
    pub impulse_scale: f32,
}

impl Default for PendulumParams {
    fn default() -> Self {
        Self {
            gravity: 0.08,
            friction: 0.92,
            tether_length: 530.0,
            impulse_scale: 0.006,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PunchingBag {
    pub pivot_x: f32,
    pub pivot_y: f32,
    pub width: f32,
    pub height: f32,
    pub angle: f32,
    pub angular_velocity: f32,
    pub hit_timer: u32,
    pub params: PendulumParams,
    pub config: FighterConfig,
    x: f32,
    y: f32,
}

impl PunchingBag {
    /// Bag at rest, hanging right of the arena centre.
    pub fn new(config: FighterConfig) -> Self {
        Self::with_params(config, PendulumParams::default())
    }

    pub fn with_params(config: FighterConfig, params: PendulumParams) -> Self {
        let mut bag = Self {
            pivot_x: ARENA_WIDTH / 2.0 + 150.0,
            pivot_y: 0.0,
            width: BAG_WIDTH,
            height: BAG_HEIGHT,
            angle: 0.0,
            angular_velocity: 0.0,
            hit_timer: 0,
            params,
            config,
            x: 0.0,
            y: 0.0,
        };
        bag.recompute_position();
        bag
    }

    /// Top-left corner of the bag body.
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.x, self.y, self.width, self.height)
    }

    pub fn update(&mut self) {
        let p = self.params;
        self.angular_velocity += -p.gravity * self.angle.sin();
        self.angular_velocity *= p.friction;
        self.angle += self.angular_velocity;

        self.recompute_position();

        if self.hit_timer > 0 {
            self.hit_timer -= 1;
        }
    }

    /// Add a horizontal strike. Positive `force` swings the bag to the right.
    pub fn apply_hit(&mut self, force: f32) {
        self.angular_velocity += force * self.params.impulse_scale;
        self.hit_timer = BAG_HIT_TICKS;
    }

    fn recompute_position(&mut self) {
        let len = self.params.tether_length;
        self.x = self.pivot_x + self.angle.sin() * len - self.width / 2.0;
        self.y = self.pivot_y + self.angle.cos() * len - self.height;
    }
}
