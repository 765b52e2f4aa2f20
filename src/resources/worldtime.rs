use bevy_ecs::prelude::Resource;

/// Simulation clock in whole milliseconds.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WorldTime {
    /// Total simulated time.
    pub elapsed: u64,
    /// Length of the current frame.
    pub delta: u64,
    pub frame_count: u64,
}
