//! ECS resources that bridge the main thread with the background audio thread.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread
//! and insert the [`AudioBridge`] resource. Call [`shutdown_audio`] during
//! teardown to stop the thread and free audio resources.
//! [`setup_audio_with`] runs any worker function on the thread, which lets the
//! bridge be exercised without an audio device.

use crate::events::audio::{AudioCmd, AudioMessage};
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

/// Spawn `worker` on a new thread and register the bridge resources.
pub fn setup_audio_with<F>(world: &mut World, worker: F)
where
    F: FnOnce(Receiver<AudioCmd>, Sender<AudioMessage>) + Send + 'static,
{
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || worker(rx_cmd, tx_msg));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.init_resource::<Messages<AudioMessage>>();
    world.init_resource::<Messages<AudioCmd>>();
}

/// Spawn the raylib audio thread and register bridge resources.
#[cfg(feature = "host")]
pub fn setup_audio(world: &mut World) {
    setup_audio_with(world, crate::systems::audio::audio_thread);
}

/// Request shutdown of the audio thread and join it.
///
/// If the bridge resource exists, sends [`AudioCmd::Shutdown`], waits for the
/// thread to exit, and removes the resource from the world.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
