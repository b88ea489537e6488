//! Audio systems backed by a dedicated thread.
//!
//! This module hosts the systems that bridge the ECS world with the audio
//! thread, and (with the `host` feature) the thread itself:
//! - [`forward_audio_cmds`] sends this frame's
//!   [`AudioCmd`](crate::events::audio::AudioCmd) messages down the channel.
//! - [`poll_audio_messages`] non-blockingly drains the audio thread's replies
//!   into the ECS message queue.
//! - [`log_audio_messages`] reports load failures.
//! - [`audio_thread`] owns the raylib audio device and plays sound effects.
//!
//! Only sound effects exist here: every tumble plays one short, non-looping
//! sound chosen by the sprite's catalog entry.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;

#[cfg(feature = "host")]
use crossbeam_channel::{Receiver, Sender};
#[cfg(feature = "host")]
use raylib::core::audio::{RaylibAudio, Sound};
#[cfg(feature = "host")]
use rustc_hash::{FxHashMap, FxHashSet};

/// Drain any pending replies from the audio thread into `Messages<AudioMessage>`.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS `AudioCmd` messages to the audio thread via the bridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // Ignore send errors; the thread is gone during shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for `AudioCmd`.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Log replies from the audio thread.
pub fn log_audio_messages(mut reader: MessageReader<AudioMessage>) {
    for msg in reader.read() {
        match msg {
            AudioMessage::FxLoadFailed { id, error } => {
                warn!("Sound '{}' could not be loaded: {}", id, error);
            }
            other => debug!("audio: {:?}", other),
        }
    }
}

/// Entry point of the dedicated audio thread.
///
/// Initialises the raylib audio device once, owns every loaded `Sound`, and
/// reacts to [`AudioCmd`] inputs until it receives [`AudioCmd::Shutdown`].
/// Finished effects are reported once with [`AudioMessage::FxFinished`].
#[cfg(feature = "host")]
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_evt: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            log::error!("[audio] failed to initialize audio device: {}", e);
            // Keep draining so senders never block; nothing will play.
            for cmd in rx_cmd.iter() {
                if let AudioCmd::Shutdown = cmd {
                    break;
                }
            }
            return;
        }
    };

    debug!("[audio] thread starting (id={:?})", std::thread::current().id());

    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();
    let mut fx_playing: FxHashSet<String> = FxHashSet::default();

    'run: loop {
        // 1) Drain commands
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                    Ok(sound) => {
                        debug!("[audio] fx loaded id='{}' path='{}'", id, path);
                        sounds.insert(id.clone(), sound);
                        let _ = tx_evt.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                            id,
                            error: format!("{path}: {e}"),
                        });
                    }
                },
                AudioCmd::PlayFx { id } => {
                    if let Some(sound) = sounds.get(&id) {
                        debug!("[audio] fx play id='{}'", id);
                        sound.play();
                        fx_playing.insert(id);
                    } else {
                        debug!("[audio] fx play skipped id='{}' reason='not loaded'", id);
                    }
                }
                AudioCmd::Shutdown => {
                    debug!("[audio] shutdown requested");
                    sounds.clear();
                    fx_playing.clear();
                    let _ = tx_evt.send(AudioMessage::FxUnloadedAll);
                    break 'run;
                }
            }
        }

        // 2) Detect finished effects
        let fx_ended: Vec<String> = fx_playing
            .iter()
            .filter(|id| !sounds.get(*id).is_some_and(|sound| sound.is_playing()))
            .cloned()
            .collect();
        for id in fx_ended {
            fx_playing.remove(&id);
            let _ = tx_evt.send(AudioMessage::FxFinished { id });
        }

        std::thread::sleep(std::time::Duration::from_millis(10));
    } // 'run

    debug!("[audio] thread exiting (id={:?})", std::thread::current().id());

    // Sounds drop before `audio`, satisfying lifetimes
}
