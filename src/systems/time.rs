//! Frame clock.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, before the schedule runs.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Add `dt_ms` to the clock and record it as this frame's delta.
///
/// The delta is not capped: a long stall arrives as one large step.
pub fn update_world_time(world: &mut World, dt_ms: u64) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.elapsed += dt_ms;
    wt.delta = dt_ms;
    wt.frame_count += 1;
}
