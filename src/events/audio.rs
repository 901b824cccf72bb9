use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Load a sound effect and fix its playback volume.
    LoadFx { id: String, path: String, volume: f32 },
    /// Play a loaded effect at `pitch` (1.0 is unchanged).
    PlayFx { id: String, pitch: f32 },
    UnloadAllFx,
    Shutdown,
}

/// Events sent *back* from the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    FxLoaded { id: String },
    FxLoadFailed { id: String, error: String },
    FxUnloadedAll,
}
