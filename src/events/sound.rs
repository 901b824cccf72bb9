//! Named sound triggers emitted by the simulation.
//!
//! The simulation never talks to the audio thread. It pushes [`SoundEvent`]s
//! and [`crate::systems::sound::sound_policy_system`] turns them into
//! [`crate::events::audio::AudioCmd::PlayFx`] commands, applying mute and
//! pitch variation on the way.

use bevy_ecs::message::Message;

/// Every sound the game can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Punch,
    Kick,
    HitLight,
    HitHeavy,
    Jump,
    Ko,
}

impl SoundCue {
    pub const ALL: [SoundCue; 6] = [
        SoundCue::Punch,
        SoundCue::Kick,
        SoundCue::HitLight,
        SoundCue::HitHeavy,
        SoundCue::Jump,
        SoundCue::Ko,
    ];

    /// Identifier used by the audio thread and as the sound file stem.
    pub fn id(self) -> &'static str {
        match self {
            SoundCue::Punch => "punch",
            SoundCue::Kick => "kick",
            SoundCue::HitLight => "hit_light",
            SoundCue::HitHeavy => "hit_heavy",
            SoundCue::Jump => "jump",
            SoundCue::Ko => "ko",
        }
    }

    /// Playback volume in `[0, 1]`.
    pub fn volume(self) -> f32 {
        match self {
            SoundCue::Ko => 0.6,
            _ => 0.4,
        }
    }
}

/// Request to play a cue once.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundEvent {
    pub cue: SoundCue,
    /// Randomize pitch in `[0.8, 1.2)`.
    pub pitch_variation: bool,
}

impl SoundEvent {
    pub fn plain(cue: SoundCue) -> Self {
        Self {
            cue,
            pitch_variation: false,
        }
    }

    pub fn varied(cue: SoundCue) -> Self {
        Self {
            cue,
            pitch_variation: true,
        }
    }
}
