//! Systems.
//!
//! Submodules overview
//! - [`audio`] – bridge with the audio thread (poll/update message queues)
//! - [`input`] – read the mouse button into [`crate::resources::input::TriggerInput`]
//! - [`render`] – rasterise the block and present the frame buffer
//! - [`tumble`] – advance the tumble controller once per frame

pub mod audio;
#[cfg(feature = "host")]
pub mod input;
pub mod render;
pub mod tumble;
