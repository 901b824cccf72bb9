//! Translates held keys into fighter actions.
//!
//! Called once per fighter per tick, before physics. Order inside one call:
//! steering, jump on press edge, punch button, kick button. A held attack
//! button keeps charging; its release edge fires the attack.

use smallvec::SmallVec;

use crate::components::fighter::{AttackKind, Fighter};
use crate::events::sound::{SoundCue, SoundEvent};
use crate::resources::gamesettings::GameSettings;
use crate::resources::input::{ControlScheme, GameKey, InputState};

/// Sounds a single fighter's input step can trigger (jump plus one release).
pub type ControlSounds = SmallVec<[SoundEvent; 2]>;

pub fn apply_fighter_input(
    fighter: &mut Fighter,
    controls: &ControlScheme,
    input: &InputState,
    settings: &GameSettings,
) -> ControlSounds {
    let mut sounds = ControlSounds::new();
    if fighter.is_knocked_out() {
        return sounds;
    }

    fighter.steer(
        input.pressed(controls.left),
        input.pressed(controls.right),
        settings,
    );

    if input.just_pressed(controls.jump) && fighter.jump(settings) {
        sounds.push(SoundEvent::plain(SoundCue::Jump));
    }

    for (key, kind) in [
        (controls.punch, AttackKind::Punch),
        (controls.kick, AttackKind::Kick),
    ] {
        if let Some(sound) = attack_button(fighter, input, key, kind) {
            sounds.push(sound);
        }
    }

    sounds
}

fn attack_button(
    fighter: &mut Fighter,
    input: &InputState,
    key: GameKey,
    kind: AttackKind,
) -> Option<SoundEvent> {
    if input.pressed(key) {
        fighter.start_charging(kind);
        return None;
    }
    if !input.just_released(key) {
        return None;
    }
    let release = fighter.release_attack(kind)?;
    let cue = match release.kind {
        AttackKind::Punch => SoundCue::Punch,
        AttackKind::Kick => SoundCue::Kick,
    };
    Some(SoundEvent {
        cue,
        pitch_variation: release.is_charged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::fighter::{Facing, FighterState};
    use crate::components::fighterconfig::FighterConfig;

    const NOTHING: [GameKey; 0] = [];

    fn setup() -> (Fighter, ControlScheme, InputState, GameSettings) {
        let s = GameSettings::default();
        (
            Fighter::new(200.0, Facing::Right, FighterConfig::player_one(), &s),
            ControlScheme::player_one(),
            InputState::default(),
            s,
        )
    }

    #[test]
    fn test_move_left() {
        let (mut f, c, mut input, s) = setup();
        input.advance([GameKey::Q]);
        apply_fighter_input(&mut f, &c, &input, &s);
        assert_eq!(f.vx, -s.move_speed);
        assert_eq!(f.facing, Facing::Left);
    }

    #[test]
    fn test_jump_fires_once_per_press() {
        let (mut f, c, mut input, s) = setup();
        input.advance([GameKey::W]);
        let sounds = apply_fighter_input(&mut f, &c, &input, &s);
        assert_eq!(sounds.as_slice(), &[SoundEvent::plain(SoundCue::Jump)]);
        f.update(&s);
        f.is_jumping = false;
        input.advance([GameKey::W]);
        let sounds = apply_fighter_input(&mut f, &c, &input, &s);
        assert!(sounds.is_empty());
    }

    #[test]
    fn test_hold_then_release_punch() {
        let (mut f, c, mut input, s) = setup();
        for _ in 0..5 {
            input.advance([GameKey::S]);
            apply_fighter_input(&mut f, &c, &input, &s);
            f.update(&s);
        }
        assert_eq!(f.state, FighterState::Charging);
        assert_eq!(f.charge_power, 10.0);

        input.advance(NOTHING);
        let sounds = apply_fighter_input(&mut f, &c, &input, &s);
        assert_eq!(sounds.as_slice(), &[SoundEvent::plain(SoundCue::Punch)]);
        assert_eq!(f.state, FighterState::Punch);
    }

    #[test]
    fn test_charged_release_varies_pitch() {
        let (mut f, c, mut input, s) = setup();
        for _ in 0..45 {
            input.advance([GameKey::D]);
            apply_fighter_input(&mut f, &c, &input, &s);
            f.update(&s);
        }
        input.advance(NOTHING);
        let sounds = apply_fighter_input(&mut f, &c, &input, &s);
        assert_eq!(sounds.as_slice(), &[SoundEvent::varied(SoundCue::Kick)]);
        assert!(f.last_attack_was_charged);
    }

    #[test]
    fn test_second_button_does_not_steal_charge() {
        let (mut f, c, mut input, s) = setup();
        input.advance([GameKey::S]);
        apply_fighter_input(&mut f, &c, &input, &s);
        input.advance([GameKey::S, GameKey::D]);
        apply_fighter_input(&mut f, &c, &input, &s);
        assert_eq!(f.charge_type, Some(AttackKind::Punch));

        input.advance([GameKey::S]);
        let sounds = apply_fighter_input(&mut f, &c, &input, &s);
        assert!(sounds.is_empty());
        assert_eq!(f.state, FighterState::Charging);
    }

    #[test]
    fn test_knocked_out_ignores_input() {
        let (mut f, c, mut input, s) = setup();
        f.take_damage(1000);
        input.advance([GameKey::Q, GameKey::W, GameKey::S]);
        let sounds = apply_fighter_input(&mut f, &c, &input, &s);
        assert!(sounds.is_empty());
        assert_eq!(f.vx, 0.0);
        assert!(f.charge_type.is_none());
    }
}
