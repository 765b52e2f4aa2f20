//! Component for attaching an entity's position to another entity.
//!
//! When an entity has the [`StuckTo`] component, the follow system moves it
//! with its target, keeping the offset captured when the relation was made.
//! Used for riders on moving creatures and for anything that should travel
//! with another sprite.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;

use crate::components::mapposition::MapPosition;

/// Component that makes an entity follow another entity's position.
#[derive(Debug, Clone, Component)]
pub struct StuckTo {
    /// The entity to follow.
    pub target: Entity,
    /// Offset from the target's position.
    pub offset: Vec2,
    /// If false, the X coordinate is left alone.
    pub follow_x: bool,
    /// If false, the Y coordinate is left alone.
    pub follow_y: bool,
}

impl StuckTo {
    /// Follow `target` on both axes with no offset.
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            offset: Vec2::ZERO,
            follow_x: true,
            follow_y: true,
        }
    }

    /// Follow `target`, keeping the current distance between the two.
    pub fn capture(target: Entity, follower: &MapPosition, target_pos: &MapPosition) -> Self {
        Self::new(target).with_offset(follower.as_vec2() - target_pos.as_vec2())
    }

    /// Follow only the X axis (riding a platform sideways).
    pub fn follow_x_only(target: Entity) -> Self {
        Self {
            follow_y: false,
            ..Self::new(target)
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}
