use bevy_ecs::prelude::Component;

/// Marks a creature as a thrown projectile.
///
/// Projectiles damage the first live sprite they touch and die when they stop
/// or are about to hit a tile.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Weapon {
    /// Thrown with a downward vertical component.
    pub downward: bool,
}
