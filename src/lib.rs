//! Tumbling block library.
//!
//! A sprite picked from a catalog rolls across a small indexed-colour screen,
//! turning a quarter turn about its lowest-rightmost corner each time the
//! trigger is pressed. When it has rolled off screen a new sprite is placed
//! back at the centre.
//!
//! The geometry, rasteriser and tumble state machine are window-free and
//! exposed here for integration tests. Window, input and audio device access
//! live behind the `host` feature.

pub mod blit;
pub mod error;
pub mod events;
pub mod game;
pub mod geometry;
pub mod resources;
pub mod surface;
pub mod systems;
