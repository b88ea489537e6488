//! Tumble update system.
//!
//! Feeds the frame's trigger edge into the
//! [`TumbleController`](crate::resources::tumble::TumbleController) and turns
//! its [`FrameReport`](crate::resources::tumble::FrameReport) into side
//! effects: a `PlayFx` audio command plus lifecycle events for observers.
use bevy_ecs::prelude::*;

use crate::events::audio::AudioCmd;
use crate::events::tumble::{TumbleResetEvent, TumbleStartedEvent};
use crate::resources::catalog::sound_key;
use crate::resources::input::TriggerInput;
use crate::resources::tumble::TumbleController;

/// Advance the tumble animation by one frame.
pub fn tumble_update(
    mut controller: ResMut<TumbleController>,
    input: Res<TriggerInput>,
    mut audio_cmds: MessageWriter<AudioCmd>,
    mut commands: Commands,
) {
    let report = controller.update(input.just_pressed);

    if let Some(sound) = report.sound {
        audio_cmds.write(AudioCmd::PlayFx {
            id: sound_key(sound),
        });
        commands.trigger(TumbleStartedEvent { sound });
    }

    if report.reset {
        commands.trigger(TumbleResetEvent {
            region: controller.state().region,
        });
    }
}
