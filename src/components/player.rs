//! Player-only movement state.
//!
//! The player entity is a [`Creature`](super::creature::Creature) plus this
//! component, which tracks ground contact and the variable-height jump: while
//! the jump button is held the player keeps rising at `jump_speed` until it
//! has climbed `jump_height` pixels above the take-off point.

use bevy_ecs::prelude::Component;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;

pub const DEFAULT_JUMP_SPEED: f32 = -0.4;
pub const DEFAULT_JUMP_HEIGHT: f32 = 200.0;

#[derive(Component, Clone, Copy, Debug)]
pub struct Player {
    on_ground: bool,
    jump_start_y: f32,
    jump_height_reached: bool,
    /// Direction of the last move key; projectiles are thrown this way.
    pub facing_right: bool,
    /// Vertical velocity applied while rising (negative is up).
    pub jump_speed: f32,
    /// Maximum climb of a held jump, in pixels.
    pub jump_height: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_JUMP_SPEED, DEFAULT_JUMP_HEIGHT)
    }
}

impl Player {
    pub fn new(jump_speed: f32, jump_height: f32) -> Self {
        Self {
            on_ground: false,
            jump_start_y: 0.0,
            jump_height_reached: false,
            facing_right: true,
            jump_speed,
            jump_height,
        }
    }

    pub fn is_on_ground(&self) -> bool {
        self.on_ground
    }

    /// Jump, or keep rising if a jump is under way.
    ///
    /// `force` jumps even in mid-air (bouncing off a stomped enemy).
    pub fn jump(&mut self, force: bool, position: &MapPosition, body: &mut RigidBody) {
        if self.on_ground || force {
            self.on_ground = false;
            self.jump_height_reached = false;
            self.jump_start_y = position.y;
        }
        if position.y > self.jump_start_y - self.jump_height && !self.jump_height_reached {
            body.velocity.y = self.jump_speed;
        } else {
            self.jump_height_reached = true;
        }
    }

    /// Releasing the button ends the climb.
    pub fn release_jump(&mut self) {
        if !self.on_ground {
            self.jump_height_reached = true;
        }
    }

    /// Called before a vertical tile hit zeroes the velocity.
    pub fn land_if_falling(&mut self, body: &RigidBody) {
        if body.velocity.y > 0.0 {
            self.on_ground = true;
            self.jump_start_y = 0.0;
            self.jump_height_reached = false;
        }
    }

    /// Track a vertical move; any drop of a whole pixel leaves the ground.
    pub fn moved_vertically(&mut self, old_y: f32, new_y: f32) {
        if new_y.round() > old_y.round() {
            self.on_ground = false;
        }
    }
}
