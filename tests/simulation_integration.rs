//! Session-level scenarios driven through keyboard input.
//!
//! These run the simulation core headless: a `VersusMatch` or
//! `PracticeSession` advanced tick by tick with an `InputState`.

use fastrand::Rng;

use faceoff::components::fighter::{FighterState, KO_TICKS};
use faceoff::components::fighterconfig::FighterConfig;
use faceoff::events::sound::{SoundCue, SoundEvent};
use faceoff::resources::arena::{Corner, PracticeSession, VersusMatch};
use faceoff::resources::commentary::{ExternalCommentator, commentary_or_fallback};
use faceoff::resources::gamesettings::GameSettings;
use faceoff::resources::input::{GameKey, InputState};

const NOTHING: [GameKey; 0] = [];

fn versus() -> VersusMatch {
    VersusMatch::with_rng(
        FighterConfig::new("Rocky", FighterConfig::player_one().color),
        FighterConfig::new("Drago", FighterConfig::player_two().color),
        GameSettings::default(),
        Rng::with_seed(42),
    )
}

/// P1 at x=400 facing right, P2 at x=460 inside punch reach.
fn versus_in_reach() -> VersusMatch {
    let mut m = versus();
    m.p1.x = 400.0;
    m.p2.x = 460.0;
    m
}

fn has_cue(sounds: &[SoundEvent], cue: SoundCue) -> bool {
    sounds.iter().any(|s| s.cue == cue)
}

#[test]
fn quick_punch_knocks_out_low_health_opponent() {
    let mut m = versus_in_reach();
    m.p2.health = 4;
    let mut input = InputState::default();

    input.advance([GameKey::S]);
    let report = m.tick(&input);
    assert!(report.sounds.is_empty());
    assert_eq!(m.p1.state, FighterState::Charging);

    input.advance(NOTHING);
    let report = m.tick(&input);
    assert!(has_cue(&report.sounds, SoundCue::Punch));
    assert!(has_cue(&report.sounds, SoundCue::HitLight));
    assert_eq!(m.p2.health, 0);
    assert_eq!(m.p2.state, FighterState::Ko);
    assert_eq!(m.p2.state_timer, KO_TICKS);
    assert_eq!(m.particles.len(), 12);
    assert!(m.shake.magnitude > 0.0);
}

#[test]
fn charged_punch_deals_double_damage() {
    let mut m = versus_in_reach();
    let mut input = InputState::default();

    // 43 ticks at +2 per tick gets past the charged threshold
    for _ in 0..43 {
        input.advance([GameKey::S]);
        m.tick(&input);
    }
    assert!(m.p1.charge_power >= 80.0);

    input.advance(NOTHING);
    let report = m.tick(&input);
    assert!(m.p1.last_attack_was_charged);
    assert_eq!(m.p2.health, 90);
    assert!(has_cue(&report.sounds, SoundCue::HitHeavy));
    let punch = report
        .sounds
        .iter()
        .find(|s| s.cue == SoundCue::Punch)
        .unwrap();
    assert!(punch.pitch_variation);
}

#[test]
fn win_latches_once_when_both_fighters_are_out() {
    let mut m = versus();
    m.p1.take_damage(1000);
    m.p2.take_damage(1000);
    let input = InputState::default();

    let mut outcomes = Vec::new();
    for tick in 1..=200 {
        let report = m.tick(&input);
        if let Some(outcome) = report.outcome {
            assert!(has_cue(&report.sounds, SoundCue::Ko));
            outcomes.push((tick, outcome));
        }
    }

    assert_eq!(outcomes.len(), 1);
    let (tick, outcome) = &outcomes[0];
    assert_eq!(*tick, KO_TICKS);
    // P1 is checked first, so P2 takes it
    assert_eq!(outcome.winner, Corner::Two);
    assert_eq!(outcome.winner_name, "Drago");
    assert_eq!(outcome.loser_name, "Rocky");
    assert!(m.is_over());
}

#[test]
fn finished_match_ignores_input() {
    let mut m = versus();
    m.p2.take_damage(1000);
    let mut input = InputState::default();
    for _ in 0..KO_TICKS {
        m.tick(&input);
    }
    assert!(m.is_over());

    let x = m.p1.x;
    input.advance([GameKey::E]);
    let report = m.tick(&input);
    assert!(report.sounds.is_empty());
    assert_eq!(m.p1.x, x);
}

#[test]
fn overlapping_fighters_are_pushed_to_minimum_distance() {
    let mut m = versus();
    m.p1.x = 400.0;
    m.p2.x = 430.0;
    let input = InputState::default();
    for _ in 0..10 {
        m.tick(&input);
    }
    assert_eq!(m.p1.x, 390.0);
    assert_eq!(m.p2.x, 440.0);
}

#[test]
fn punching_the_bag_swings_it_then_it_settles() {
    let mut p = PracticeSession::with_rng(
        FighterConfig::player_one(),
        FighterConfig::bag(),
        GameSettings::default(),
        Rng::with_seed(7),
    );
    p.fighter.x = 540.0;
    let mut input = InputState::default();

    input.advance([GameKey::S]);
    p.tick(&input);
    input.advance(NOTHING);
    let report = p.tick(&input);

    assert!(has_cue(&report.sounds, SoundCue::Punch));
    assert!(has_cue(&report.sounds, SoundCue::HitLight));
    assert!(p.bag.angular_velocity > 0.0);
    assert!(p.bag.hit_timer > 0);
    assert!(p.fighter.state_timer <= 2);
    assert_eq!(p.particles.len(), 10);

    let mut peak = p.bag.angular_velocity.abs();
    for _ in 0..400 {
        p.tick(&input);
        peak = peak.max(p.bag.angular_velocity.abs());
    }
    assert!(peak < 0.1);
    assert!(p.bag.angular_velocity.abs() < 1e-3);
    assert!(p.particles.is_empty());
    assert_eq!(p.shake.magnitude, 0.0);
}

#[test]
fn failing_commentator_falls_back_to_winner_line() {
    let commentator = ExternalCommentator::from_command_line("/nonexistent/faceoff-announcer");
    let text = commentary_or_fallback(&commentator, "Rocky", "Drago");
    assert_eq!(text, "THE FIGHT IS OVER! Rocky STANDS TRIUMPHANT!");
}
