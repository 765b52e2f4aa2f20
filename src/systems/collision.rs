//! Collision queries against the tile grid and between sprites.
//!
//! [`tile_collision`] sweeps a body's bounds from its current position to a
//! proposed one and reports the first blocking tile, scanning columns left to
//! right and each column top to bottom. Solid tiles and the area outside the
//! map's left and right edges always block; one-way platforms only stop a
//! body whose bottom edge is moving down into the top band of the platform.
//! Falling out through the bottom of the map is left to the scene.
//!
//! Sprite overlap uses pixel-rounded bounds; dead and dying creatures never
//! collide.

use bevy_ecs::prelude::*;

use crate::components::creature::Creature;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::powerup::PowerUp;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::{Bounds, Sprite};
use crate::components::weapon::Weapon;
use crate::resources::tilemap::{TileMap, TilePoint};

/// Every map entity, as the scene systems see it.
pub type SpriteQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut MapPosition,
        &'static mut RigidBody,
        &'static mut Sprite,
        Option<&'static mut Creature>,
        Option<&'static PowerUp>,
        Option<&'static Weapon>,
        Option<&'static mut Player>,
    ),
>;

/// Position and size of a body about to move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Footprint {
    pub fn of(position: &MapPosition, sprite: &Sprite) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: sprite.width() as f32,
            height: sprite.height() as f32,
        }
    }
}

/// First tile blocking a move of `body` to `(new_x, new_y)`.
///
/// Meant for moves along one axis at a time.
pub fn tile_collision(
    map: &TileMap,
    body: &Footprint,
    new_x: f32,
    new_y: f32,
    platform_tolerance: f32,
) -> Option<TilePoint> {
    let from_x = map.pixels_to_tiles(body.x.min(new_x));
    let from_y = map.pixels_to_tiles(body.y.min(new_y));
    let to_x = map.pixels_to_tiles(body.x.max(new_x) + body.width - 1.0);
    let to_y = map.pixels_to_tiles(body.y.max(new_y) + body.height - 1.0);

    let moving_down = body.y < new_y;
    let bottom = new_y + body.height;

    for x in from_x..=to_x {
        for y in from_y..=to_y {
            if x < 0 || x >= map.width() as i32 {
                return Some(TilePoint::new(x, y));
            }
            if map.tile(x, y).is_none() {
                continue;
            }
            if !map.is_platform(x, y) {
                return Some(TilePoint::new(x, y));
            }
            let top = map.tiles_to_pixels(y) as f32;
            if moving_down && bottom > top && bottom < top + platform_tolerance {
                return Some(TilePoint::new(x, y));
            }
        }
    }
    None
}

/// True when `bounds` overlaps a placed sprite that is not a fallen creature.
pub fn sprite_touches(
    bounds: &Bounds,
    position: &MapPosition,
    sprite: &Sprite,
    creature: Option<&Creature>,
) -> bool {
    creature.is_none_or(Creature::is_alive) && sprite.bounds_at(position).overlaps(bounds)
}

/// First entity of `candidates` (other than `subject`) touching `bounds`.
pub fn find_sprite_collision(
    sprites: &SpriteQuery,
    candidates: &[Entity],
    subject: Entity,
    bounds: Bounds,
) -> Option<Entity> {
    candidates.iter().copied().find(|&other| {
        other != subject
            && sprites
                .get(other)
                .is_ok_and(|(position, _, sprite, creature, ..)| {
                    sprite_touches(&bounds, position, sprite, creature)
                })
    })
}
