//! Strike resolution.
//!
//! One call checks one attacker against one target. Sessions call it for
//! every ordered pair each tick. A landed strike staggers the victim, which
//! also withdraws the victim's own attack, so on an exact trade the pair
//! checked first wins. The caller turns the returned [`Impact`] into sound,
//! shake and particles.

use crate::components::fighter::{DamageOutcome, Fighter, FighterState};
use crate::components::punchingbag::PunchingBag;
use crate::components::tint::Tint;
use crate::events::sound::{SoundCue, SoundEvent};
use crate::resources::gamesettings::GameSettings;

/// Bag impulse of an uncharged strike.
pub const BAG_LIGHT_FORCE: f32 = 5.0;
/// Bag impulse of a charged strike.
pub const BAG_HEAVY_FORCE: f32 = 12.0;
/// Attack timer cap after striking the bag.
pub const BAG_RECOVERY_TICKS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitStrength {
    Light,
    Heavy,
}

impl HitStrength {
    pub fn from_charged(charged: bool) -> Self {
        if charged {
            HitStrength::Heavy
        } else {
            HitStrength::Light
        }
    }

    pub fn sound(self) -> SoundEvent {
        match self {
            HitStrength::Light => SoundEvent::varied(SoundCue::HitLight),
            HitStrength::Heavy => SoundEvent::varied(SoundCue::HitHeavy),
        }
    }

    /// Particle color: white for heavy hits, the attacker's accent otherwise.
    pub fn particle_color(self, attacker: &Fighter) -> Tint {
        match self {
            HitStrength::Heavy => Tint::WHITE,
            HitStrength::Light => attacker.config.color,
        }
    }
}

/// A strike that landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub strength: HitStrength,
    /// Top-left corner of the attack hitbox.
    pub x: f32,
    pub y: f32,
    pub color: Tint,
    /// Damage dealt. Zero for bag strikes.
    pub damage: i32,
    pub outcome: Option<DamageOutcome>,
}

/// Base damage of the attacker's current move, doubled when charged.
pub fn strike_damage(attacker: &Fighter, settings: &GameSettings) -> Option<i32> {
    let base = attacker.active_attack()?.base_damage(settings);
    Some(if attacker.last_attack_was_charged {
        base.saturating_mul(2)
    } else {
        base
    })
}

/// Apply `attacker`'s active hitbox to `victim`.
///
/// Victims already in `Hit` or `Ko` are immune.
pub fn resolve_strike(
    attacker: &Fighter,
    victim: &mut Fighter,
    settings: &GameSettings,
) -> Option<Impact> {
    let hitbox = attacker.attack_hitbox()?;
    if matches!(victim.state, FighterState::Hit | FighterState::Ko) {
        return None;
    }
    if !hitbox.overlaps(&victim.hitbox()) {
        return None;
    }

    let damage = strike_damage(attacker, settings)?;
    let outcome = victim.take_damage(damage);
    let strength = HitStrength::from_charged(attacker.last_attack_was_charged);

    Some(Impact {
        strength,
        x: hitbox.x,
        y: hitbox.y,
        color: strength.particle_color(attacker),
        damage,
        outcome: Some(outcome),
    })
}

/// Apply `attacker`'s active hitbox to the bag.
///
/// The bag is pushed in the attacker's facing direction and the attacker's
/// state timer is capped at [`BAG_RECOVERY_TICKS`].
pub fn resolve_bag_strike(attacker: &mut Fighter, bag: &mut PunchingBag) -> Option<Impact> {
    let hitbox = attacker.attack_hitbox()?;
    if !hitbox.overlaps(&bag.hitbox()) {
        return None;
    }

    let strength = HitStrength::from_charged(attacker.last_attack_was_charged);
    let force = match strength {
        HitStrength::Heavy => BAG_HEAVY_FORCE,
        HitStrength::Light => BAG_LIGHT_FORCE,
    };
    bag.apply_hit(attacker.facing.sign() * force);
    attacker.state_timer = attacker.state_timer.min(BAG_RECOVERY_TICKS);

    Some(Impact {
        strength,
        x: hitbox.x,
        y: hitbox.y,
        color: strength.particle_color(attacker),
        damage: 0,
        outcome: None,
    })
}
