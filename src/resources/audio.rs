//! ECS resources that bridge the main thread with the background audio thread.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread
//! and insert the [`AudioBridge`] and message resources. Call
//! [`shutdown_audio`] during teardown to stop the thread and free every sound.

use std::path::PathBuf;

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::sound::SoundCue;
use crate::systems::audio::audio_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// Shared bridge between the ECS world and the audio thread.
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> ECS).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Playback policy applied to every [`crate::events::sound::SoundEvent`].
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AudioSettings {
    pub muted: bool,
    /// Directory holding `<cue id>.wav` files.
    pub sounds_dir: PathBuf,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            muted: false,
            sounds_dir: PathBuf::from("./assets/sounds"),
        }
    }
}

impl AudioSettings {
    pub fn cue_path(&self, cue: SoundCue) -> PathBuf {
        self.sounds_dir.join(format!("{}.wav", cue.id()))
    }

    /// Commands that load every [`SoundCue`] at its playback volume.
    pub fn load_commands(&self) -> Vec<AudioCmd> {
        SoundCue::ALL
            .iter()
            .map(|&cue| AudioCmd::LoadFx {
                id: cue.id().to_string(),
                path: self.cue_path(cue).to_string_lossy().into_owned(),
                volume: cue.volume(),
            })
            .collect()
    }
}

/// Spawn the audio thread and register bridge resources.
pub fn setup_audio(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.insert_resource(Messages::<AudioMessage>::default());
    world.insert_resource(Messages::<AudioCmd>::default());
}

/// Request shutdown of the audio thread and join it.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::UnloadAllFx);
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_commands_cover_every_cue() {
        let settings = AudioSettings {
            muted: false,
            sounds_dir: PathBuf::from("snd"),
        };
        let cmds = settings.load_commands();
        assert_eq!(cmds.len(), SoundCue::ALL.len());
        assert!(cmds.contains(&AudioCmd::LoadFx {
            id: "ko".into(),
            path: PathBuf::from("snd").join("ko.wav").to_string_lossy().into_owned(),
            volume: 0.6,
        }));
    }
}
