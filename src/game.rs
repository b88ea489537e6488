//! World setup and the per-frame schedule.
//!
//! [`setup_world`] builds a [`World`] holding every resource the tumble needs,
//! registers the lifecycle observers and performs the initial reset.
//! [`core_schedule`] runs one frame of simulation and rasterisation without
//! touching any window, so the binary and the integration tests drive the
//! same systems.

use bevy_ecs::prelude::*;
use log::info;

use crate::error::Result;
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::tumble::{observe_tumble_reset, observe_tumble_started};
use crate::resources::catalog::{SpriteCatalog, sound_key};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::TriggerInput;
use crate::resources::palette::Palette;
use crate::resources::screensize::ScreenSize;
use crate::resources::stats::TumbleStats;
use crate::resources::surfaces::{FrameBuffer, SpriteSheet};
use crate::resources::tumble::TumbleController;
use crate::systems::audio::update_bevy_audio_cmds;
use crate::systems::render::render_frame;
use crate::systems::tumble::tumble_update;

/// Build the world for `config`.
///
/// Fails if the tumble settings are unusable. The RNG is seeded from
/// `config.seed` when present so runs can be replayed.
pub fn setup_world(config: &GameConfig, catalog: SpriteCatalog, sheet: SpriteSheet) -> Result<World> {
    config.validate()?;

    let rng = config
        .seed
        .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let controller = TumbleController::new(config.tumble_settings(), catalog.clone(), rng)?;

    let mut world = World::new();
    world.insert_resource(ScreenSize {
        w: config.screen_width,
        h: config.screen_height,
    });
    world.insert_resource(FrameBuffer::new(config.screen_width, config.screen_height));
    world.insert_resource(sheet);
    world.insert_resource(Palette::default());
    world.insert_resource(TriggerInput::default());
    world.insert_resource(TumbleStats::default());
    world.insert_resource(controller);
    world.insert_resource(catalog);
    world.insert_resource(config.clone());
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<AudioMessage>>();

    world.add_observer(observe_tumble_started);
    world.add_observer(observe_tumble_reset);
    // Observers must be registered before any system triggers events.
    world.flush();

    info!(
        "World ready: {}x{} screen, {} sprites, {} deg/frame",
        config.screen_width,
        config.screen_height,
        world.resource::<SpriteCatalog>().len(),
        config.angle_per_frame
    );

    Ok(world)
}

/// Queue `LoadFx` commands for every sound in the catalog.
pub fn queue_sound_loads(world: &mut World) {
    let cmds: Vec<AudioCmd> = world
        .resource::<SpriteCatalog>()
        .sounds()
        .iter()
        .map(|entry| AudioCmd::LoadFx {
            id: sound_key(entry.id),
            path: entry.path.clone(),
        })
        .collect();
    let mut messages = world.resource_mut::<Messages<AudioCmd>>();
    for cmd in cmds {
        messages.write(cmd);
    }
}

/// One frame of tumble simulation followed by rasterisation.
pub fn core_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((update_bevy_audio_cmds, tumble_update, render_frame).chain());
    schedule
}
