//! Collectible items.

use bevy_ecs::prelude::Component;
use serde::Deserialize;

/// What a power-up does when the player touches it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    /// Score bonus.
    Star,
    /// Toggles the drum track of the background music.
    Music,
    /// Ends the level.
    Goal,
}

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind) -> Self {
        Self { kind }
    }
}
