//! The active level.
//!
//! [`TileMap`] holds the tile grid of the current level, the parallel grid of
//! one-way platform flags, the ordered list of live sprite entities and the
//! player entity (which is not part of that list). Coordinates passed to the
//! grid accessors are tile coordinates; anything outside the grid reads as
//! empty.

use bevy_ecs::prelude::{Entity, Resource};

use crate::resources::images::ImageHandle;

/// Pixel size of a square tile when nothing else is configured.
pub const DEFAULT_TILE_SIZE: i32 = 64;

/// A tile coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TilePoint {
    pub x: i32,
    pub y: i32,
}

impl TilePoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct TileMap {
    width: usize,
    height: usize,
    tile_size: i32,
    tiles: Vec<Option<ImageHandle>>,
    platforms: Vec<bool>,
    sprites: Vec<Entity>,
    player: Option<Entity>,
}

impl Default for TileMap {
    fn default() -> Self {
        Self::new(0, 0, DEFAULT_TILE_SIZE)
    }
}

impl TileMap {
    /// Empty map of `width` x `height` tiles.
    pub fn new(width: usize, height: usize, tile_size: i32) -> Self {
        Self {
            width,
            height,
            tile_size: tile_size.max(1),
            tiles: vec![None; width * height],
            platforms: vec![false; width * height],
            sprites: Vec::new(),
            player: None,
        }
    }

    /// Width in tiles.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Pixel width of the whole map.
    pub fn pixel_width(&self) -> i32 {
        self.tiles_to_pixels(self.width as i32)
    }

    /// Pixel height of the whole map.
    pub fn pixel_height(&self) -> i32 {
        self.tiles_to_pixels(self.height as i32)
    }

    /// Tile index containing the pixel coordinate, rounding the pixel first.
    pub fn pixels_to_tiles(&self, pixels: f32) -> i32 {
        (pixels.round() as i32).div_euclid(self.tile_size)
    }

    /// Pixel coordinate of the tile's top or left edge.
    pub fn tiles_to_pixels(&self, tiles: i32) -> i32 {
        tiles * self.tile_size
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    /// Tile image at `(x, y)`, `None` for empty or out-of-bounds cells.
    pub fn tile(&self, x: i32, y: i32) -> Option<ImageHandle> {
        self.index(x, y).and_then(|i| self.tiles[i])
    }

    /// Place (or clear) a tile. Out-of-bounds writes are ignored.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Option<ImageHandle>) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    /// Mark a cell as one-way platform.
    pub fn set_platform(&mut self, x: i32, y: i32, platform: bool) {
        if let Some(i) = self.index(x, y) {
            self.platforms[i] = platform;
        }
    }

    pub fn is_platform(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.platforms[i])
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn set_player(&mut self, player: Option<Entity>) {
        self.player = player;
    }

    /// Live sprites in iteration order.
    pub fn sprites(&self) -> &[Entity] {
        &self.sprites
    }

    pub fn add_sprite(&mut self, entity: Entity) {
        self.sprites.push(entity);
    }

    /// Remove one sprite, keeping the order of the rest.
    pub fn remove_sprite(&mut self, entity: Entity) -> bool {
        match self.sprites.iter().position(|e| *e == entity) {
            Some(i) => {
                self.sprites.remove(i);
                true
            }
            None => false,
        }
    }

    /// Remove every listed sprite in one pass.
    pub fn remove_sprites(&mut self, removed: &[Entity]) {
        if removed.is_empty() {
            return;
        }
        self.sprites.retain(|e| !removed.contains(e));
    }

    /// Drop all sprites and the player reference.
    pub fn take_entities(&mut self) -> Vec<Entity> {
        let mut entities = std::mem::take(&mut self.sprites);
        entities.extend(self.player.take());
        entities
    }
}
