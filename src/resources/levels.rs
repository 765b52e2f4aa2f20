//! Map files and the level sequence.
//!
//! Levels live in numbered text files, `map1.txt`, `map2.txt`, ... in the
//! maps directory. Each line is one row of tiles:
//!
//! - lines starting with `#` are comments;
//! - the map is as wide as its longest line, short lines are padded with
//!   empty cells;
//! - a character that indexes the catalog's tile list places a tile, the
//!   catalog's platform letter also marks the cell as a one-way platform;
//! - a character naming a catalog host places a sprite in that cell;
//! - anything else is an empty cell.
//!
//! [`LevelSequencer`] remembers which map is current and wraps back to the
//! first map after the last one.

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use log::{info, warn};

use crate::error::LoadError;
use crate::resources::catalog::{HostSprite, ResourceCatalog};
use crate::resources::tilemap::TileMap;

/// A host sprite waiting to be spawned in a tile.
#[derive(Debug, Clone)]
pub struct Placement {
    pub host: HostSprite,
    pub tile_x: i32,
    pub tile_y: i32,
}

/// A parsed level, before any entity exists.
#[derive(Debug, Clone)]
pub struct LevelLayout {
    /// Number of the map file the level came from.
    pub number: u32,
    pub map: TileMap,
    pub placements: Vec<Placement>,
    /// Tile where the player appears.
    pub player_spawn: (i32, i32),
}

/// Parse the text of map `number`.
pub fn parse_map(
    number: u32,
    text: &str,
    catalog: &ResourceCatalog,
    tile_size: i32,
) -> Result<LevelLayout, LoadError> {
    let rows: Vec<Vec<char>> = text
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| line.chars().collect())
        .collect();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if rows.is_empty() || width == 0 {
        return Err(LoadError::EmptyMap(number));
    }

    let mut map = TileMap::new(width, rows.len(), tile_size);
    let mut placements = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, code) in row.iter().enumerate() {
            let (x, y) = (x as i32, y as i32);
            if let Some(tile) = catalog.tile_for(*code) {
                map.set_tile(x, y, Some(tile));
                if *code == catalog.platform_tile() {
                    map.set_platform(x, y, true);
                }
            } else if let Some(host) = catalog.host(*code) {
                placements.push(Placement {
                    host: host.clone(),
                    tile_x: x,
                    tile_y: y,
                });
            }
        }
    }

    Ok(LevelLayout {
        number,
        map,
        placements,
        player_spawn: catalog.player_spawn(number),
    })
}

/// Which map is current, and how to get the next one.
#[derive(Resource, Debug, Clone)]
pub struct LevelSequencer {
    maps_dir: PathBuf,
    current: u32,
}

impl LevelSequencer {
    /// Sequencer before the first map; call [`LevelSequencer::load_next`].
    pub fn new(maps_dir: impl Into<PathBuf>) -> Self {
        Self {
            maps_dir: maps_dir.into(),
            current: 0,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn maps_dir(&self) -> &Path {
        &self.maps_dir
    }

    pub fn map_path(&self, number: u32) -> PathBuf {
        self.maps_dir.join(format!("map{number}.txt"))
    }

    fn read(&self, number: u32) -> Result<String, LoadError> {
        let path = self.map_path(number);
        std::fs::read_to_string(&path).map_err(|source| LoadError::Io { path, source })
    }

    /// Advance to the next map, wrapping to map 1 after the last one.
    pub fn load_next(
        &mut self,
        catalog: &ResourceCatalog,
        tile_size: i32,
    ) -> Result<LevelLayout, LoadError> {
        loop {
            self.current += 1;
            match self.read(self.current) {
                Ok(text) => {
                    info!("Loading map {}", self.current);
                    return parse_map(self.current, &text, catalog, tile_size);
                }
                Err(err) if self.current == 1 => {
                    warn!("No first map: {}", err);
                    self.current = 0;
                    return Err(LoadError::NoMaps(self.maps_dir.clone()));
                }
                Err(err) => {
                    info!("Map {} unavailable ({}), wrapping to map 1", self.current, err);
                    self.current = 0;
                }
            }
        }
    }

    /// Re-read the current map from disk.
    pub fn reload(
        &mut self,
        catalog: &ResourceCatalog,
        tile_size: i32,
    ) -> Result<LevelLayout, LoadError> {
        if self.current == 0 {
            return self.load_next(catalog, tile_size);
        }
        let text = self.read(self.current)?;
        parse_map(self.current, &text, catalog, tile_size)
    }

    /// Load map `number`; the current map is unchanged on failure.
    pub fn jump_to(
        &mut self,
        number: u32,
        catalog: &ResourceCatalog,
        tile_size: i32,
    ) -> Result<LevelLayout, LoadError> {
        let text = self.read(number)?;
        let layout = parse_map(number, &text, catalog, tile_size)?;
        self.current = number;
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::Animation;
    use crate::components::creature::{CreatureAnimations, CreatureKind};
    use crate::components::powerup::PowerUpKind;
    use crate::resources::catalog::CreatureHost;
    use crate::resources::images::ImageHandle;

    fn catalog() -> ResourceCatalog {
        let tiles = (0..12).map(|i| ImageHandle::new(i, 64, 64)).collect();
        let star = Animation::from_frames([(ImageHandle::new(100, 32, 32), 100)]);
        ResourceCatalog::new(
            tiles,
            CreatureHost::new(CreatureKind::Player, CreatureAnimations::default()),
        )
        .with_host(
            'o',
            HostSprite::PowerUp {
                kind: PowerUpKind::Star,
                animation: star,
            },
        )
        .with_player_spawn(2, 5, 1)
    }

    #[test]
    fn test_parse_comments_width_and_padding() {
        let text = "# level one\nA\n\nAAA o\n# trailing\n";
        let layout = parse_map(1, text, &catalog(), 64).unwrap();
        assert_eq!(layout.map.width(), 5);
        assert_eq!(layout.map.height(), 3);
        assert!(layout.map.tile(0, 0).is_some());
        assert!(layout.map.tile(1, 0).is_none());
        assert!((0..5).all(|x| layout.map.tile(x, 1).is_none()));
        assert!(layout.map.tile(2, 2).is_some());
        assert_eq!(layout.placements.len(), 1);
        assert_eq!((layout.placements[0].tile_x, layout.placements[0].tile_y), (4, 2));
    }

    #[test]
    fn test_platform_letter_marks_platform() {
        let layout = parse_map(1, "ALB", &catalog(), 64).unwrap();
        assert!(!layout.map.is_platform(0, 0));
        assert!(layout.map.is_platform(1, 0));
        assert!(layout.map.tile(1, 0).is_some());
        assert!(!layout.map.is_platform(2, 0));
    }

    #[test]
    fn test_unknown_characters_are_empty() {
        let layout = parse_map(1, "Z?x ", &catalog(), 64).unwrap();
        assert!((0..4).all(|x| layout.map.tile(x, 0).is_none()));
        assert!(layout.placements.is_empty());
    }

    #[test]
    fn test_empty_map_is_an_error() {
        assert!(matches!(
            parse_map(4, "# only comments\n", &catalog(), 64),
            Err(LoadError::EmptyMap(4))
        ));
    }

    #[test]
    fn test_player_spawn_from_catalog() {
        assert_eq!(parse_map(2, "A", &catalog(), 64).unwrap().player_spawn, (5, 1));
        assert_eq!(parse_map(1, "A", &catalog(), 64).unwrap().player_spawn, (3, 0));
    }

    fn maps_dir(count: u32) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for n in 1..=count {
            std::fs::write(dir.path().join(format!("map{n}.txt")), "A".repeat(n as usize)).unwrap();
        }
        dir
    }

    #[test]
    fn test_load_next_wraps_to_first_map() {
        let dir = maps_dir(2);
        let mut levels = LevelSequencer::new(dir.path());
        let catalog = catalog();

        assert_eq!(levels.load_next(&catalog, 64).unwrap().number, 1);
        assert_eq!(levels.load_next(&catalog, 64).unwrap().number, 2);
        let wrapped = levels.load_next(&catalog, 64).unwrap();
        assert_eq!(wrapped.number, 1);
        assert_eq!(wrapped.map.width(), 1);
        assert_eq!(levels.current(), 1);
    }

    #[test]
    fn test_load_next_without_maps() {
        let dir = tempfile::tempdir().unwrap();
        let mut levels = LevelSequencer::new(dir.path());
        assert!(matches!(
            levels.load_next(&catalog(), 64),
            Err(LoadError::NoMaps(_))
        ));
        assert_eq!(levels.current(), 0);
    }

    #[test]
    fn test_reload_rereads_current_map() {
        let dir = maps_dir(2);
        let mut levels = LevelSequencer::new(dir.path());
        let catalog = catalog();
        levels.load_next(&catalog, 64).unwrap();
        levels.load_next(&catalog, 64).unwrap();

        std::fs::write(dir.path().join("map2.txt"), "AAAAAAA").unwrap();
        let layout = levels.reload(&catalog, 64).unwrap();
        assert_eq!(layout.number, 2);
        assert_eq!(layout.map.width(), 7);
    }

    #[test]
    fn test_jump_to_missing_map_keeps_current() {
        let dir = maps_dir(2);
        let mut levels = LevelSequencer::new(dir.path());
        let catalog = catalog();
        levels.load_next(&catalog, 64).unwrap();

        let err = levels.jump_to(9, &catalog, 64).unwrap_err();
        assert!(err.is_missing_file());
        assert_eq!(levels.current(), 1);

        assert_eq!(levels.jump_to(2, &catalog, 64).unwrap().number, 2);
        assert_eq!(levels.current(), 2);
    }
}
