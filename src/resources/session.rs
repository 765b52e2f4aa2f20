//! Per-game bookkeeping shared by the scene systems.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    pub lives: i32,
    pub score: u32,
    pub paused: bool,
    /// A projectile may be thrown.
    pub attack_ready: bool,
    /// Lives ran out; the simulation halts until [`GameSession::restart`].
    pub game_over: bool,
    /// The current frame was spent on a level change.
    pub frame_aborted: bool,
    pub quit_requested: bool,
    /// The drum track of the level music is playing.
    pub drums_on: bool,
    starting_lives: i32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(2)
    }
}

impl GameSession {
    pub fn new(lives: i32) -> Self {
        Self {
            lives,
            score: 0,
            paused: false,
            attack_ready: true,
            game_over: false,
            frame_aborted: false,
            quit_requested: false,
            drums_on: false,
            starting_lives: lives,
        }
    }

    /// True when the scene should advance this frame.
    pub fn is_running(&self) -> bool {
        !self.game_over && !self.frame_aborted && !self.paused
    }

    pub fn lose_life(&mut self) {
        self.lives = (self.lives - 1).max(0);
    }

    /// Fresh game with the starting number of lives.
    pub fn restart(&mut self) {
        *self = Self::new(self.starting_lives);
    }
}
