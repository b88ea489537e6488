//! Tumbleblock main entry point.
//!
//! A sprite rolls across a 160x120 indexed-colour screen using:
//! - **raylib** for windowing, input, presentation and audio
//! - **bevy_ecs** for resources, systems and observers
//!
//! # Main Loop
//!
//! 1. Load `config.ini` and the sprite catalog, open the window
//! 2. Decode the sprite sheet and build the ECS world
//! 3. Start the audio thread and queue every catalog sound for loading
//! 4. Each frame:
//!    - Read the mouse button
//!    - Advance the tumble and forward sound commands to the audio thread
//!    - Rasterise into the frame buffer, upload it to a texture and present it
//!      letterboxed
//! 5. Clean up audio thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --seed 42
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

use tumbleblock::error::TumbleError;
use tumbleblock::game::{core_schedule, queue_sound_loads, setup_world};
use tumbleblock::resources::audio::{setup_audio, shutdown_audio};
use tumbleblock::resources::catalog::SpriteCatalog;
use tumbleblock::resources::frametexture::FrameTexture;
use tumbleblock::resources::gameconfig::GameConfig;
use tumbleblock::resources::palette::Palette;
use tumbleblock::resources::surfaces::load_sprite_sheet;
use tumbleblock::systems::audio::{
    forward_audio_cmds, log_audio_messages, poll_audio_messages, update_bevy_audio_messages,
};
use tumbleblock::systems::input::update_trigger_input;
use tumbleblock::systems::render::{present_frame, render_frame};
use tumbleblock::systems::tumble::tumble_update;

/// Tumbling block animation
#[derive(Parser)]
#[command(version, about = "Click to roll a sprite across the screen.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Sprite catalog JSON; overrides `[assets] catalog`.
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// RNG seed; overrides `[tumble] seed`.
    #[arg(long)]
    seed: Option<u64>,
}

/// Log a fatal startup error and exit.
fn fail(context: &str, err: TumbleError) -> ! {
    error!("{context}: {err}");
    std::process::exit(1);
}

fn load_config(path: PathBuf) -> GameConfig {
    let mut config = GameConfig::with_path(path.clone());
    match config.load_from_file() {
        Ok(()) => config,
        Err(TumbleError::ConfigFile(reason)) => {
            warn!("{reason}; using defaults");
            GameConfig::with_path(path)
        }
        Err(e) => fail("Invalid configuration", e),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config);
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(catalog) = cli.catalog {
        config.catalog = Some(catalog);
    }

    let catalog = match &config.catalog {
        Some(path) => SpriteCatalog::load(path).unwrap_or_else(|e| fail("Sprite catalog", e)),
        None => {
            info!("Using built-in sprite catalog");
            SpriteCatalog::default()
        }
    };

    // --------------- Raylib window & assets ---------------
    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title(&config.title)
        .build();
    rl.set_target_fps(config.target_fps);

    let sheet = load_sprite_sheet(&config.sprite_sheet, &Palette::default())
        .unwrap_or_else(|e| fail("Sprite sheet", e));
    let frame_texture = FrameTexture::new(&mut rl, &thread, config.screen_width, config.screen_height)
        .unwrap_or_else(|e| fail("Frame texture", e));

    // --------------- ECS world + resources ---------------
    let mut world = setup_world(&config, catalog, sheet).unwrap_or_else(|e| fail("Startup", e));
    world.insert_non_send_resource(frame_texture);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    // Init audio
    setup_audio(&mut world);
    queue_sound_loads(&mut world);

    let mut update = core_schedule();
    update.add_systems(update_trigger_input.before(tumble_update));
    update.add_systems(
        // audio systems must be together
        (
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
            log_audio_messages,
        )
            .chain()
            .after(tumble_update),
    );
    update.add_systems(present_frame.after(render_frame));

    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {e}");
        std::process::exit(1);
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        update.run(&mut world);
        world.clear_trackers();
    }
    shutdown_audio(&mut world);
    // GPU resources must go before the window closes.
    world.remove_non_send_resource::<FrameTexture>();
}
