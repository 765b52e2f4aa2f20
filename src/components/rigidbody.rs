//! Kinematic body component.
//!
//! The [`RigidBody`] stores the velocity of an entity in pixels per
//! millisecond. Gravity and tile collisions are applied by the scene
//! systems; the body itself only carries state.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Velocity of a moving map entity, in pixels per millisecond.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct RigidBody {
    pub velocity: Vec2,
}

impl RigidBody {
    /// Create a body at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a body moving with the given velocity.
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self { velocity }
    }

    pub fn set_velocity_x(&mut self, vx: f32) {
        self.velocity.x = vx;
    }

    pub fn set_velocity_y(&mut self, vy: f32) {
        self.velocity.y = vy;
    }

    /// Zero both velocity components.
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }
}
