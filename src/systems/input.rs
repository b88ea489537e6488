//! Input system.
//!
//! [`update_trigger_input`] reads the left mouse button from raylib each frame
//! and writes it into [`TriggerInput`], which the tumble system consumes.
use bevy_ecs::prelude::*;
use raylib::consts::MouseButton;

use crate::resources::input::TriggerInput;

/// Poll raylib for the trigger button and update the `TriggerInput` resource.
pub fn update_trigger_input(mut input: ResMut<TriggerInput>, rl: NonSend<raylib::RaylibHandle>) {
    input.set_level(rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT));
}
