//! Per-creature movement against the tile grid.
//!
//! A creature moves one axis at a time: gravity first, then X, then Y. Each
//! axis move is checked with
//! [`tile_collision`](crate::systems::collision::tile_collision); on a hit
//! the creature is snapped flush against the blocking tile and told about the
//! collision so it can bounce or stop. The player and projectile systems
//! interleave their own checks between the axes, which is why the steps are
//! separate functions instead of one system.

use crate::components::creature::Creature;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::resources::gameconfig::GameConfig;
use crate::resources::tilemap::TileMap;
use crate::systems::collision::{Footprint, tile_collision};

/// Frame-wide movement parameters.
#[derive(Clone, Copy, Debug)]
pub struct MoveParams {
    pub gravity: f32,
    pub platform_tolerance: f32,
    pub delta_ms: u64,
}

impl MoveParams {
    pub fn new(config: &GameConfig, delta_ms: u64) -> Self {
        Self {
            gravity: config.gravity,
            platform_tolerance: config.platform_tolerance,
            delta_ms,
        }
    }

    fn dt(&self) -> f32 {
        self.delta_ms as f32
    }
}

/// Accelerate downward unless the creature is flying.
pub fn apply_gravity(params: &MoveParams, creature: &Creature, body: &mut RigidBody) {
    if !creature.is_flying() {
        body.velocity.y += params.gravity * params.dt();
    }
}

/// Move along X. Returns true when a tile was hit.
pub fn move_horizontal(
    params: &MoveParams,
    map: &TileMap,
    position: &mut MapPosition,
    body: &mut RigidBody,
    sprite: &Sprite,
    creature: &Creature,
) -> bool {
    let dx = body.velocity.x;
    let new_x = position.x + dx * params.dt();
    let footprint = Footprint::of(position, sprite);

    match tile_collision(map, &footprint, new_x, position.y, params.platform_tolerance) {
        None => {
            position.x = new_x;
            false
        }
        Some(tile) => {
            if dx > 0.0 {
                position.x = (map.tiles_to_pixels(tile.x) - sprite.width() as i32) as f32;
            } else if dx < 0.0 {
                position.x = map.tiles_to_pixels(tile.x + 1) as f32;
            }
            creature.collide_horizontal(body);
            true
        }
    }
}

/// Move along Y. Returns true when a tile was hit.
///
/// The player also gets its ground contact updated.
pub fn move_vertical(
    params: &MoveParams,
    map: &TileMap,
    position: &mut MapPosition,
    body: &mut RigidBody,
    sprite: &Sprite,
    creature: &Creature,
    mut player: Option<&mut Player>,
) -> bool {
    let dy = body.velocity.y;
    let old_y = position.y;
    let new_y = old_y + dy * params.dt();
    let footprint = Footprint::of(position, sprite);

    let hit = tile_collision(map, &footprint, position.x, new_y, params.platform_tolerance);
    match hit {
        None => position.y = new_y,
        Some(tile) => {
            if dy > 0.0 {
                position.y = (map.tiles_to_pixels(tile.y) - sprite.height() as i32) as f32;
            } else if dy < 0.0 {
                position.y = map.tiles_to_pixels(tile.y + 1) as f32;
            }
        }
    }
    if let Some(player) = player.as_deref_mut() {
        player.moved_vertically(old_y, position.y);
    }

    if hit.is_some() {
        if let Some(player) = player {
            player.land_if_falling(body);
        }
        creature.collide_vertical(body);
    }
    hit.is_some()
}

/// True when the top of the body is below the bottom of the map.
pub fn fell_off_map(map: &TileMap, position: &MapPosition) -> bool {
    position.y > map.pixel_height() as f32
}
