//! Viewport and camera arithmetic.
//!
//! The camera follows the player and is clamped so the map always fills the
//! screen when it is large enough to. Drawing is left to the host; these are
//! the numbers it needs (and the numbers the wake-up system uses to decide
//! what is on screen).

use bevy_ecs::prelude::Resource;
use glam::IVec2;

use crate::components::mapposition::MapPosition;
use crate::resources::tilemap::TileMap;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
        }
    }

    /// Screen offset of map pixel (0, 0) with the camera on `focus`.
    pub fn camera_offset(&self, map: &TileMap, focus: &MapPosition) -> IVec2 {
        let tile = map.tile_size();
        let axis = |screen: i32, pos: f32, map_size: i32| {
            let offset = screen / 2 - pos.round() as i32 - tile;
            offset.min(0).max(screen - map_size)
        };
        IVec2::new(
            axis(self.width, focus.x, map.pixel_width()),
            axis(self.height, focus.y, map.pixel_height()),
        )
    }

    /// True when a sprite whose left edge is at map `x` starts on screen.
    pub fn shows_x(&self, camera: IVec2, x: f32) -> bool {
        let screen_x = x.round() as i32 + camera.x;
        screen_x >= 0 && screen_x < self.width
    }
}
