//! Tumble lifecycle events and their observers.
//!
//! [`tumble_update`](crate::systems::tumble::tumble_update) triggers a
//! [`TumbleStartedEvent`] when a quarter turn begins and a
//! [`TumbleResetEvent`] when the sprite rolled off screen and was replaced.
//! The observers here keep the [`TumbleStats`] resource current and log the
//! transitions.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::catalog::SpriteRegion;
use crate::resources::stats::TumbleStats;

/// A quarter turn started and `sound` was requested.
#[derive(Event, Debug, Clone, Copy)]
pub struct TumbleStartedEvent {
    pub sound: u32,
}

/// The sprite left the screen; `region` is the newly chosen sprite.
#[derive(Event, Debug, Clone, Copy)]
pub struct TumbleResetEvent {
    pub region: SpriteRegion,
}

/// Count started tumbles.
pub fn observe_tumble_started(trigger: On<TumbleStartedEvent>, mut stats: ResMut<TumbleStats>) {
    stats.tumbles += 1;
    stats.tumbles_since_reset += 1;
    log::trace!("Tumble #{} (sound {})", stats.tumbles, trigger.event().sound);
}

/// Count resets and log the new sprite.
pub fn observe_tumble_reset(trigger: On<TumbleResetEvent>, mut stats: ResMut<TumbleStats>) {
    let region = trigger.event().region;
    stats.resets += 1;
    info!(
        "Sprite left the screen after {} tumbles; next sprite {}x{} at ({}, {})",
        stats.tumbles_since_reset, region.width, region.height, region.x, region.y
    );
    stats.tumbles_since_reset = 0;
}
