//! Fighter entity and its state machine.
//!
//! A [`Fighter`] owns its position, velocity, health and attack charge. The
//! [`FighterState`] drives both physics and the rendered pose:
//!
//! ```text
//! Idle ──start_charging──▶ Charging ──release_attack──▶ Punch / Kick
//!   ▲                                                       │
//!   └──────────── state_timer reaches 0 ◀───────────────────┘
//!
//! any non-KO ──take_damage──▶ Hit ──timer──▶ Idle
//! any        ──health == 0──▶ Ko   (terminal)
//! ```
//!
//! # Timers
//!
//! `state_timer` counts down once per [`Fighter::update`]. Punch, kick and hit
//! return to idle on the first update after the timer reached zero. The KO
//! timer only paces the fall animation; the state never changes afterwards.
//!
//! # Related
//!
//! - [`crate::systems::combat`] – applies attack hitboxes to victims
//! - [`crate::systems::fightercontrol`] – translates held keys into calls here

use crate::components::fighterconfig::FighterConfig;
use crate::components::hitbox::Hitbox;
use crate::resources::gamesettings::{ARENA_HEIGHT, ARENA_WIDTH, FLOOR_MARGIN, GameSettings};

pub const FIGHTER_WIDTH: f32 = 60.0;
pub const FIGHTER_HEIGHT: f32 = 180.0;

/// Charge gained per tick while holding an attack button.
pub const CHARGE_RATE: f32 = 2.0;
pub const MAX_CHARGE: f32 = 100.0;
/// Minimum charge at release for a charged (double damage) attack.
pub const CHARGED_THRESHOLD: f32 = 80.0;
/// Size and offset multiplier of a charged attack's hitbox.
pub const CHARGED_SCALE: f32 = 1.5;

pub const PUNCH_TICKS: u32 = 12;
pub const KICK_TICKS: u32 = 18;
pub const HIT_TICKS: u32 = 12;
pub const KO_TICKS: u32 = 60;

const BOB_STEP: f32 = 0.1;

/// Horizontal facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Right,
    Left,
}

impl Facing {
    /// `+1.0` for right, `-1.0` for left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// Mutually exclusive fighter states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FighterState {
    Idle,
    Charging,
    Punch,
    Kick,
    Hit,
    Ko,
}

/// The two attack families. Only one can be charging at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackKind {
    Punch,
    Kick,
}

impl AttackKind {
    /// Uncharged damage of this attack.
    pub fn base_damage(self, settings: &GameSettings) -> i32 {
        match self {
            AttackKind::Punch => settings.punch_damage,
            AttackKind::Kick => settings.kick_damage,
        }
    }

    /// How long the attack pose (and its hitbox) stays out.
    pub fn duration(self) -> u32 {
        match self {
            AttackKind::Punch => PUNCH_TICKS,
            AttackKind::Kick => KICK_TICKS,
        }
    }

    fn state(self) -> FighterState {
        match self {
            AttackKind::Punch => FighterState::Punch,
            AttackKind::Kick => FighterState::Kick,
        }
    }
}

/// Returned by [`Fighter::release_attack`]; the caller uses it to pick a sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackRelease {
    pub kind: AttackKind,
    pub is_charged: bool,
    /// Charge power at the moment of release.
    pub power: f32,
}

/// What [`Fighter::take_damage`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already knocked out; nothing changed.
    Ignored,
    /// Health dropped and the fighter entered `Hit`.
    Staggered,
    /// Health reached zero and the fighter entered `Ko`.
    KnockedOut,
}

/// A combatant in the ring.
#[derive(Debug, Clone)]
pub struct Fighter {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    pub is_jumping: bool,
    pub health: i32,
    pub max_health: i32,
    pub state: FighterState,
    pub state_timer: u32,
    pub charge_type: Option<AttackKind>,
    pub charge_power: f32,
    pub last_attack_was_charged: bool,
    /// Phase of the idle bob animation. Rendering only.
    pub bob_phase: f32,
    pub config: FighterConfig,
}

impl Fighter {
    /// Create a fighter standing on the floor at horizontal position `x`.
    pub fn new(x: f32, facing: Facing, config: FighterConfig, settings: &GameSettings) -> Self {
        let mut fighter = Self {
            x,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            width: FIGHTER_WIDTH,
            height: FIGHTER_HEIGHT,
            facing,
            is_jumping: false,
            health: settings.max_health,
            max_health: settings.max_health,
            state: FighterState::Idle,
            state_timer: 0,
            charge_type: None,
            charge_power: 0.0,
            last_attack_was_charged: false,
            bob_phase: 0.0,
            config,
        };
        fighter.y = fighter.floor_y();
        fighter
    }

    /// Start the idle bob at a given phase so two fighters do not bob in sync.
    pub fn with_bob_phase(mut self, phase: f32) -> Self {
        self.bob_phase = phase;
        self
    }

    /// Y coordinate of the fighter's top edge when standing on the floor.
    pub fn floor_y(&self) -> f32 {
        ARENA_HEIGHT - self.height - FLOOR_MARGIN
    }

    pub fn is_knocked_out(&self) -> bool {
        self.state == FighterState::Ko
    }

    /// KO'd and the fall animation has finished.
    pub fn ko_settled(&self) -> bool {
        self.state == FighterState::Ko && self.state_timer == 0
    }

    /// Advance physics and timers by one tick.
    pub fn update(&mut self, settings: &GameSettings) {
        let floor_y = self.floor_y();

        if self.state != FighterState::Ko || self.y < floor_y {
            self.vy += settings.gravity;
            self.y += self.vy;
        }
        self.x += self.vx;

        self.bob_phase += BOB_STEP;

        if self.y > floor_y {
            self.y = floor_y;
            self.vy = 0.0;
            self.is_jumping = false;
        }

        self.x = self.x.clamp(0.0, ARENA_WIDTH - self.width);

        if self.state == FighterState::Charging {
            self.charge_power = (self.charge_power + CHARGE_RATE).min(MAX_CHARGE);
        }

        if self.state_timer > 0 {
            self.state_timer -= 1;
        } else if matches!(
            self.state,
            FighterState::Punch | FighterState::Kick | FighterState::Hit
        ) {
            self.state = FighterState::Idle;
        }
    }

    /// Set horizontal velocity from the held move keys. Right wins when both
    /// are held. KO'd fighters do not move.
    pub fn steer(&mut self, left: bool, right: bool, settings: &GameSettings) {
        if self.is_knocked_out() {
            return;
        }
        self.vx = 0.0;
        if left {
            self.vx = -settings.move_speed;
            self.facing = Facing::Left;
        }
        if right {
            self.vx = settings.move_speed;
            self.facing = Facing::Right;
        }
    }

    /// Returns `true` when the jump started.
    pub fn jump(&mut self, settings: &GameSettings) -> bool {
        if self.is_jumping || self.is_knocked_out() {
            return false;
        }
        self.vy = settings.jump_force;
        self.is_jumping = true;
        true
    }

    /// Begin (or keep) charging `kind`. Returns `true` while charging `kind`.
    pub fn start_charging(&mut self, kind: AttackKind) -> bool {
        let keeps_charging =
            self.state == FighterState::Charging && self.charge_type == Some(kind);
        if self.state == FighterState::Idle || keeps_charging {
            self.state = FighterState::Charging;
            self.charge_type = Some(kind);
            return true;
        }
        false
    }

    /// Let go of a charged `kind`. Releasing a button that does not own the
    /// current charge does nothing.
    pub fn release_attack(&mut self, kind: AttackKind) -> Option<AttackRelease> {
        if self.state != FighterState::Charging || self.charge_type != Some(kind) {
            return None;
        }

        let power = self.charge_power;
        let is_charged = power >= CHARGED_THRESHOLD;
        self.last_attack_was_charged = is_charged;
        self.state = kind.state();
        self.state_timer = kind.duration();
        self.cancel_charge();

        Some(AttackRelease {
            kind,
            is_charged,
            power,
        })
    }

    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.is_knocked_out() {
            return DamageOutcome::Ignored;
        }
        self.health = (self.health - amount).max(0);
        self.cancel_charge();

        if self.health == 0 {
            self.state = FighterState::Ko;
            self.state_timer = KO_TICKS;
            self.vx = 0.0;
            DamageOutcome::KnockedOut
        } else {
            self.state = FighterState::Hit;
            self.state_timer = HIT_TICKS;
            DamageOutcome::Staggered
        }
    }

    fn cancel_charge(&mut self) {
        self.charge_power = 0.0;
        self.charge_type = None;
    }

    /// The attack currently out, if any.
    pub fn active_attack(&self) -> Option<AttackKind> {
        match self.state {
            FighterState::Punch => Some(AttackKind::Punch),
            FighterState::Kick => Some(AttackKind::Kick),
            _ => None,
        }
    }

    /// Multiplier applied to the current attack pose and hitbox.
    pub fn attack_scale(&self) -> f32 {
        if self.last_attack_was_charged {
            CHARGED_SCALE
        } else {
            1.0
        }
    }

    /// Full-body hitbox.
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.x, self.y, self.width, self.height)
    }

    /// Fist or foot hitbox while a punch or kick is out.
    pub fn attack_hitbox(&self) -> Option<Hitbox> {
        let kind = self.active_attack()?;
        let scale = self.attack_scale();
        let (base_w, base_h, dy) = match kind {
            AttackKind::Punch => (40.0, 15.0, 70.0),
            AttackKind::Kick => (45.0, 20.0, 130.0),
        };
        let x = match self.facing {
            Facing::Right => self.x + 50.0,
            Facing::Left => self.x - 30.0 * scale,
        };
        Some(Hitbox::new(x, self.y + dy, base_w * scale, base_h * scale))
    }
}
