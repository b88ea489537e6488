use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum AudioCmd {
    /// Load a sound effect file under `id`.
    LoadFx { id: String, path: String },
    /// Play a loaded effect once.
    PlayFx { id: String },
    /// Drop every sound and stop the thread.
    Shutdown,
}

/// Events sent *back* from the audio thread
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum AudioMessage {
    FxLoaded { id: String },
    /// Every sound was released during shutdown.
    FxUnloadedAll,
    FxLoadFailed { id: String, error: String },
    FxFinished { id: String },
}
