//! Per-frame trigger input resource.
//!
//! The only input the animation reacts to is a single "tumble" trigger. The
//! host writes it once per frame before the tumble systems run; the state is
//! kept free of any windowing types so it can be driven from tests.
use bevy_ecs::prelude::*;

/// Boolean button state for the tumble trigger.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerInput {
    /// Whether the button is currently held.
    pub active: bool,
    /// Whether the button went down this frame.
    pub just_pressed: bool,
    /// Whether the button went up this frame.
    pub just_released: bool,
}

impl TriggerInput {
    /// Record this frame's button level and derive the edges from the last one.
    pub fn set_level(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}
