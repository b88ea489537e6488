use bevy_ecs::prelude::Resource;

/// Running totals kept by the tumble observers.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TumbleStats {
    /// Quarter turns started since startup.
    pub tumbles: u64,
    /// Times the sprite left the screen and was replaced.
    pub resets: u64,
    /// Quarter turns started by the current sprite.
    pub tumbles_since_reset: u64,
}
