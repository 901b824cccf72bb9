//! Sound policy.
//!
//! Turns simulation [`SoundEvent`]s into [`AudioCmd::PlayFx`] commands for
//! the audio thread. Mute drops everything here; pitch variation is rolled
//! here so the simulation stays free of audio concerns.

use bevy_ecs::prelude::*;
use fastrand::Rng;

use crate::events::audio::AudioCmd;
use crate::events::sound::SoundEvent;
use crate::resources::audio::AudioSettings;

pub const PITCH_MIN: f32 = 0.8;
pub const PITCH_SPREAD: f32 = 0.4;

/// Playback pitch for `event`: `1.0`, or a value in `[0.8, 1.2)` when the
/// event asks for variation.
pub fn sound_pitch(event: &SoundEvent, rng: &mut Rng) -> f32 {
    if event.pitch_variation {
        PITCH_MIN + rng.f32() * PITCH_SPREAD
    } else {
        1.0
    }
}

pub fn sound_policy_system(
    mut reader: MessageReader<SoundEvent>,
    settings: Res<AudioSettings>,
    mut writer: MessageWriter<AudioCmd>,
    mut rng: Local<Rng>,
) {
    if settings.muted {
        // consume so nothing plays after unmuting
        reader.clear();
        return;
    }
    for event in reader.read() {
        writer.write(AudioCmd::PlayFx {
            id: event.cue.id().to_string(),
            pitch: sound_pitch(event, &mut rng),
        });
    }
}

/// Advance the ECS message queue for [`SoundEvent`].
pub fn update_sound_events(mut msgs: ResMut<Messages<SoundEvent>>) {
    msgs.update();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::sound::SoundCue;

    #[test]
    fn test_plain_sound_keeps_pitch() {
        let mut rng = Rng::with_seed(11);
        assert_eq!(sound_pitch(&SoundEvent::plain(SoundCue::Jump), &mut rng), 1.0);
    }

    #[test]
    fn test_varied_pitch_range() {
        let mut rng = Rng::with_seed(5);
        for _ in 0..500 {
            let p = sound_pitch(&SoundEvent::varied(SoundCue::HitHeavy), &mut rng);
            assert!((0.8..1.2).contains(&p), "pitch {} out of range", p);
        }
    }
}
