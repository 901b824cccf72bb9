//! Audio system implementation backed by a dedicated thread and Raylib.
//!
//! This module hosts the background audio thread and the systems that bridge
//! it with the ECS world:
//! - [`audio_thread`] runs on its own OS thread, owns the Raylib audio device,
//!   and processes [`AudioCmd`](crate::events::audio::AudioCmd) messages,
//!   emitting [`AudioMessage`](crate::events::audio::AudioMessage) responses.
//! - [`poll_audio_messages`] non-blockingly drains the audio thread's event
//!   receiver into the ECS message queue each frame.
//! - [`forward_audio_cmds`] pushes queued commands down the channel.
//!
//! Raylib audio calls stay on a single thread; the game thread only talks to
//! it through `crossbeam_channel`.
//!
//! See also: [`crate::events::audio`] and [`crate::resources::audio`].

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::{MessageReader, MessageWriter, Messages, Res, ResMut};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::{debug, info, warn};
use raylib::core::audio::{RaylibAudio, Sound};
use rustc_hash::FxHashMap;

/// Drain any pending events from the audio thread into the ECS
/// [`Messages<AudioMessage>`] mailbox.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
///
/// Run this after [`poll_audio_messages`] in the schedule.
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS [`AudioCmd`] messages to the audio thread.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // ignore send error on shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for [`AudioCmd`].
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Log incoming audio thread replies.
pub fn log_audio_messages(mut reader: MessageReader<AudioMessage>) {
    for msg in reader.read() {
        match msg {
            AudioMessage::FxLoaded { id } => debug!("sound '{}' ready", id),
            AudioMessage::FxLoadFailed { id, error } => {
                warn!("sound '{}' unavailable: {}", id, error)
            }
            AudioMessage::FxUnloadedAll => debug!("all sounds unloaded"),
        }
    }
}

/// Entry point of the dedicated audio thread.
///
/// Owns every `Sound` handle. Blocks until [`AudioCmd::Shutdown`] arrives or
/// the command channel disconnects, then unloads everything and exits.
/// When no audio device is available the thread keeps draining commands so
/// senders never block, but plays nothing.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_evt: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => Some(device),
        Err(e) => {
            warn!("audio device unavailable, running silent: {}", e);
            None
        }
    };

    info!(
        "audio thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();

    loop {
        let cmd = match rx_cmd.try_recv() {
            Ok(cmd) => cmd,
            Err(TryRecvError::Empty) => {
                std::thread::sleep(std::time::Duration::from_millis(10));
                continue;
            }
            Err(TryRecvError::Disconnected) => break,
        };

        match cmd {
            AudioCmd::LoadFx { id, path, volume } => {
                let Some(audio) = audio.as_ref() else {
                    let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                        id,
                        error: "no audio device".to_string(),
                    });
                    continue;
                };
                match audio.new_sound(&path) {
                    Ok(sound) => {
                        debug!("fx loaded id='{}' path='{}'", id, path);
                        sound.set_volume(volume);
                        sounds.insert(id.clone(), sound);
                        let _ = tx_evt.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        warn!("fx load failed id='{}' path='{}' error='{}'", id, path, e);
                        let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                }
            }
            AudioCmd::PlayFx { id, pitch } => {
                if let Some(sound) = sounds.get(&id) {
                    sound.set_pitch(pitch);
                    sound.play();
                } else {
                    debug!("fx play skipped id='{}' reason='not loaded'", id);
                }
            }
            AudioCmd::UnloadAllFx => {
                sounds.clear();
                let _ = tx_evt.send(AudioMessage::FxUnloadedAll);
            }
            AudioCmd::Shutdown => {
                debug!("audio shutdown requested");
                break;
            }
        }
    }

    sounds.clear();
    let _ = tx_evt.send(AudioMessage::FxUnloadedAll);

    info!(
        "audio thread exiting (id={:?})",
        std::thread::current().id()
    );
}
