//! Sprites created during a frame.
//!
//! Systems that create sprites while the scene is being swept (a thrown
//! projectile) queue them here; the spawn system adds them to the level after
//! the sweep, so the sprite list never changes under an iteration.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::resources::catalog::HostSprite;

#[derive(Debug, Clone)]
pub struct SpawnRequest {
    pub host: HostSprite,
    /// Top-left corner in map pixels.
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Resource, Debug, Default)]
pub struct SpawnQueue {
    pending: Vec<SpawnRequest>,
}

impl SpawnQueue {
    pub fn push(&mut self, request: SpawnRequest) {
        self.pending.push(request);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, SpawnRequest> {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
