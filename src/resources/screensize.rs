//! Screen size resource.
//!
//! Stores the logical frame buffer dimensions in pixels. The host scales this
//! area into the window when presenting.

use bevy_ecs::prelude::Resource;

/// Logical screen size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}
