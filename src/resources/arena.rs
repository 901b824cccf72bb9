//! The running fight.
//!
//! A session owns every entity of one fight and advances them with a single
//! `tick` per frame. Nothing outside the session mutates its fighters, bag or
//! particles; the ECS layer keeps the session in the [`Arena`] resource and
//! reads it for rendering.
//!
//! Tick order (both modes):
//!
//! 1. fighter input
//! 2. physics
//! 3. separation (versus only)
//! 4. strikes, P1→P2 then P2→P1, or P1→bag
//! 5. particles and screen shake
//! 6. win check (versus only)

use bevy_ecs::prelude::*;
use fastrand::Rng;
use log::{debug, info};
use smallvec::SmallVec;

use crate::components::fighter::{Facing, Fighter};
use crate::components::fighterconfig::FighterConfig;
use crate::components::particle::{Particle, spawn_burst, update_particles};
use crate::components::punchingbag::PunchingBag;
use crate::events::sound::{SoundCue, SoundEvent};
use crate::resources::gamesettings::{ARENA_WIDTH, GameSettings};
use crate::resources::input::{ControlScheme, InputState};
use crate::systems::combat::{HitStrength, Impact, resolve_bag_strike, resolve_strike};
use crate::systems::fightercontrol::apply_fighter_input;
use crate::systems::separation::separate;

pub const P1_START_X: f32 = 200.0;
pub const P2_START_X: f32 = ARENA_WIDTH - 260.0;

/// Shake and particle amounts for one kind of session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackProfile {
    pub light_shake: f32,
    pub heavy_shake: f32,
    pub light_particles: usize,
    pub heavy_particles: usize,
}

pub const VERSUS_FEEDBACK: FeedbackProfile = FeedbackProfile {
    light_shake: 8.0,
    heavy_shake: 20.0,
    light_particles: 12,
    heavy_particles: 25,
};

pub const PRACTICE_FEEDBACK: FeedbackProfile = FeedbackProfile {
    light_shake: 5.0,
    heavy_shake: 15.0,
    light_particles: 10,
    heavy_particles: 20,
};

/// Camera shake magnitude in pixels. Decays by one per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenShake {
    pub magnitude: f32,
}

impl ScreenShake {
    /// Replace the current shake.
    pub fn kick(&mut self, magnitude: f32) {
        self.magnitude = magnitude;
    }

    pub fn decay(&mut self) {
        self.magnitude = (self.magnitude - 1.0).max(0.0);
    }

    /// Random offset in `(-magnitude/2, magnitude/2)` on each axis.
    pub fn offset(&self, rng: &mut Rng) -> (f32, f32) {
        if self.magnitude <= 0.0 {
            return (0.0, 0.0);
        }
        (
            (rng.f32() - 0.5) * self.magnitude,
            (rng.f32() - 0.5) * self.magnitude,
        )
    }
}

/// Which fighter slot won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    One,
    Two,
}

/// Result of a finished versus match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: Corner,
    pub winner_name: String,
    pub loser_name: String,
}

/// Everything one tick produced for the outside world.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TickReport {
    pub sounds: SmallVec<[SoundEvent; 4]>,
    /// Set on the single tick the match ends.
    pub outcome: Option<MatchOutcome>,
}

fn apply_feedback(
    impact: &Impact,
    profile: &FeedbackProfile,
    shake: &mut ScreenShake,
    particles: &mut Vec<Particle>,
    rng: &mut Rng,
    sounds: &mut SmallVec<[SoundEvent; 4]>,
) {
    let (magnitude, count) = match impact.strength {
        HitStrength::Light => (profile.light_shake, profile.light_particles),
        HitStrength::Heavy => (profile.heavy_shake, profile.heavy_particles),
    };
    sounds.push(impact.strength.sound());
    shake.kick(magnitude);
    spawn_burst(particles, rng, impact.x, impact.y, count, impact.color);
}

/// Two fighters, first to knock the other out wins.
#[derive(Debug)]
pub struct VersusMatch {
    pub p1: Fighter,
    pub p2: Fighter,
    pub particles: Vec<Particle>,
    pub shake: ScreenShake,
    pub controls: [ControlScheme; 2],
    settings: GameSettings,
    outcome: Option<MatchOutcome>,
    rng: Rng,
}

impl VersusMatch {
    pub fn new(p1: FighterConfig, p2: FighterConfig, settings: GameSettings) -> Self {
        Self::with_rng(p1, p2, settings, Rng::new())
    }

    /// Same as [`VersusMatch::new`] with a caller supplied RNG.
    pub fn with_rng(p1: FighterConfig, p2: FighterConfig, settings: GameSettings, rng: Rng) -> Self {
        info!("versus: {} vs {}", p1.name, p2.name);
        Self {
            p1: Fighter::new(P1_START_X, Facing::Right, p1, &settings),
            p2: Fighter::new(P2_START_X, Facing::Left, p2, &settings).with_bob_phase(1.0),
            particles: Vec::new(),
            shake: ScreenShake::default(),
            controls: [ControlScheme::player_one(), ControlScheme::player_two()],
            settings,
            outcome: None,
            rng,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// The latched result, once the match has ended.
    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Advance one frame. Does nothing once the match has ended.
    pub fn tick(&mut self, input: &InputState) -> TickReport {
        let mut report = TickReport::default();
        if self.is_over() {
            return report;
        }

        let [c1, c2] = self.controls;
        report
            .sounds
            .extend(apply_fighter_input(&mut self.p1, &c1, input, &self.settings));
        report
            .sounds
            .extend(apply_fighter_input(&mut self.p2, &c2, input, &self.settings));

        self.p1.update(&self.settings);
        self.p2.update(&self.settings);

        separate(&mut self.p1, &mut self.p2);

        let strikes = [
            resolve_strike(&self.p1, &mut self.p2, &self.settings),
            resolve_strike(&self.p2, &mut self.p1, &self.settings),
        ];
        for impact in strikes.iter().flatten() {
            debug!(
                "strike {:?} for {} at ({:.0}, {:.0})",
                impact.strength, impact.damage, impact.x, impact.y
            );
            apply_feedback(
                impact,
                &VERSUS_FEEDBACK,
                &mut self.shake,
                &mut self.particles,
                &mut self.rng,
                &mut report.sounds,
            );
        }

        update_particles(&mut self.particles);
        self.shake.decay();

        let winner = if self.p1.ko_settled() {
            Some(Corner::Two)
        } else if self.p2.ko_settled() {
            Some(Corner::One)
        } else {
            None
        };
        if let Some(corner) = winner {
            let (w, l) = match corner {
                Corner::One => (&self.p1, &self.p2),
                Corner::Two => (&self.p2, &self.p1),
            };
            let outcome = MatchOutcome {
                winner: corner,
                winner_name: w.config.name.clone(),
                loser_name: l.config.name.clone(),
            };
            info!("match over: {} defeats {}", outcome.winner_name, outcome.loser_name);
            report.sounds.push(SoundEvent::plain(SoundCue::Ko));
            self.outcome = Some(outcome.clone());
            report.outcome = Some(outcome);
        }

        report
    }
}

/// One fighter against the pendulum bag. Never ends on its own.
#[derive(Debug)]
pub struct PracticeSession {
    pub fighter: Fighter,
    pub bag: PunchingBag,
    pub particles: Vec<Particle>,
    pub shake: ScreenShake,
    pub controls: ControlScheme,
    settings: GameSettings,
    rng: Rng,
}

impl PracticeSession {
    pub fn new(fighter: FighterConfig, bag: FighterConfig, settings: GameSettings) -> Self {
        Self::with_rng(fighter, bag, settings, Rng::new())
    }

    pub fn with_rng(
        fighter: FighterConfig,
        bag: FighterConfig,
        settings: GameSettings,
        rng: Rng,
    ) -> Self {
        info!("practice: {} vs {}", fighter.name, bag.name);
        Self {
            fighter: Fighter::new(P1_START_X, Facing::Right, fighter, &settings),
            bag: PunchingBag::new(bag),
            particles: Vec::new(),
            shake: ScreenShake::default(),
            controls: ControlScheme::player_one(),
            settings,
            rng,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn tick(&mut self, input: &InputState) -> TickReport {
        let mut report = TickReport::default();

        report.sounds.extend(apply_fighter_input(
            &mut self.fighter,
            &self.controls,
            input,
            &self.settings,
        ));

        self.fighter.update(&self.settings);
        self.bag.update();

        if let Some(impact) = resolve_bag_strike(&mut self.fighter, &mut self.bag) {
            debug!("bag strike {:?}, swing {:.3}", impact.strength, self.bag.angular_velocity);
            apply_feedback(
                &impact,
                &PRACTICE_FEEDBACK,
                &mut self.shake,
                &mut self.particles,
                &mut self.rng,
                &mut report.sounds,
            );
        }

        update_particles(&mut self.particles);
        self.shake.decay();

        report
    }
}

/// Session kind selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    Versus,
    Practice,
}

/// Everything needed to (re)build a session. Rematches reuse it unchanged.
#[derive(Resource, Debug, Clone)]
pub struct SessionSetup {
    pub mode: GameMode,
    pub player1: FighterConfig,
    pub player2: FighterConfig,
    pub bag: FighterConfig,
    pub settings: GameSettings,
}

impl Default for SessionSetup {
    fn default() -> Self {
        Self {
            mode: GameMode::Versus,
            player1: FighterConfig::player_one(),
            player2: FighterConfig::player_two(),
            bag: FighterConfig::bag(),
            settings: GameSettings::default(),
        }
    }
}

impl SessionSetup {
    pub fn build(&self) -> Arena {
        match self.mode {
            GameMode::Versus => Arena::Versus(VersusMatch::new(
                self.player1.clone(),
                self.player2.clone(),
                self.settings,
            )),
            GameMode::Practice => Arena::Practice(PracticeSession::new(
                self.player1.clone(),
                self.bag.clone(),
                self.settings,
            )),
        }
    }
}

/// The session currently on screen.
#[derive(Resource, Debug)]
pub enum Arena {
    Versus(VersusMatch),
    Practice(PracticeSession),
}

impl Arena {
    pub fn tick(&mut self, input: &InputState) -> TickReport {
        match self {
            Arena::Versus(m) => m.tick(input),
            Arena::Practice(p) => p.tick(input),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        match self {
            Arena::Versus(m) => &m.particles,
            Arena::Practice(p) => &p.particles,
        }
    }

    pub fn shake(&self) -> ScreenShake {
        match self {
            Arena::Versus(m) => m.shake,
            Arena::Practice(p) => p.shake,
        }
    }

    /// Every fighter in draw order.
    pub fn fighters(&self) -> SmallVec<[&Fighter; 2]> {
        match self {
            Arena::Versus(m) => SmallVec::from_buf([&m.p1, &m.p2]),
            Arena::Practice(p) => smallvec::smallvec![&p.fighter],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::input::GameKey;

    #[test]
    fn test_shake_decays_to_zero() {
        let mut shake = ScreenShake::default();
        shake.kick(2.5);
        shake.decay();
        shake.decay();
        shake.decay();
        assert_eq!(shake.magnitude, 0.0);
        let mut rng = Rng::with_seed(3);
        assert_eq!(shake.offset(&mut rng), (0.0, 0.0));
    }

    #[test]
    fn test_shake_offset_is_bounded() {
        let shake = ScreenShake { magnitude: 20.0 };
        let mut rng = Rng::with_seed(9);
        for _ in 0..100 {
            let (dx, dy) = shake.offset(&mut rng);
            assert!(dx.abs() <= 10.0 && dy.abs() <= 10.0);
        }
    }

    #[test]
    fn test_versus_start_positions() {
        let m = VersusMatch::new(
            FighterConfig::player_one(),
            FighterConfig::player_two(),
            GameSettings::default(),
        );
        assert_eq!(m.p1.x, 200.0);
        assert_eq!(m.p2.x, 740.0);
        assert_eq!(m.p1.facing, Facing::Right);
        assert_eq!(m.p2.facing, Facing::Left);
        assert!(!m.is_over());
    }

    #[test]
    fn test_idle_tick_is_quiet() {
        let mut m = VersusMatch::new(
            FighterConfig::player_one(),
            FighterConfig::player_two(),
            GameSettings::default(),
        );
        let input = InputState::default();
        let report = m.tick(&input);
        assert!(report.sounds.is_empty());
        assert!(report.outcome.is_none());
    }

    #[test]
    fn test_session_setup_builds_selected_mode() {
        let mut setup = SessionSetup::default();
        assert!(matches!(setup.build(), Arena::Versus(_)));
        setup.mode = GameMode::Practice;
        let arena = setup.build();
        assert!(matches!(arena, Arena::Practice(_)));
        assert_eq!(arena.fighters().len(), 1);
    }

    #[test]
    fn test_practice_jump_sound() {
        let mut p = PracticeSession::with_rng(
            FighterConfig::player_one(),
            FighterConfig::bag(),
            GameSettings::default(),
            Rng::with_seed(1),
        );
        let mut input = InputState::default();
        input.advance([GameKey::W]);
        let report = p.tick(&input);
        assert_eq!(report.sounds.as_slice(), &[SoundEvent::plain(SoundCue::Jump)]);
    }
}
