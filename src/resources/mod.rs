//! ECS resources made available to systems.
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `catalog` – sprite sheet regions and their sounds
//! - `frametexture` – window texture the frame buffer is presented through (host)
//! - `gameconfig` – INI-backed settings
//! - `input` – trigger button state for the current frame
//! - `palette` – indexed colour table
//! - `screensize` – logical frame buffer dimensions
//! - `stats` – tumble and reset counters
//! - `surfaces` – sprite sheet and frame buffer images
//! - `tumble` – the tumble state machine
pub mod audio;
pub mod catalog;
#[cfg(feature = "host")]
pub mod frametexture;
pub mod gameconfig;
pub mod input;
pub mod palette;
pub mod screensize;
pub mod stats;
pub mod surfaces;
pub mod tumble;
