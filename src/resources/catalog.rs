//! Level-independent assets: tiles, host sprites and spawn points.
//!
//! The [`ResourceCatalog`] tells the map parser what every character of a map
//! file means. Uppercase letters index the tile list (`'A'` is the first
//! tile) and any other character may name a host sprite, a template that is
//! cloned into a fresh entity wherever the character appears.
//!
//! Creature hosts are declared with their left-facing images only; the
//! right-facing and "dead" (upside-down) variants are derived through the
//! [`ImageProvider`] when the catalog is built.
//!
//! # Manifest format
//!
//! ```json
//! {
//!   "images": [{ "name": "tile_a", "width": 64, "height": 64 }, ...],
//!   "tiles": ["tile_a", "tile_b"],
//!   "platform_tile": "L",
//!   "animations": { "grub": [{ "image": "grub1", "duration_ms": 250 }, ...] },
//!   "player": { "kind": "player", "walk": "player" },
//!   "hosts": [
//!     { "type": "creature", "code": "1", "kind": "grub", "walk": "grub" },
//!     { "type": "power_up", "code": "o", "kind": "star", "animation": "star" }
//!   ],
//!   "projectile": "7",
//!   "player_spawns": { "1": [3, 0] }
//! }
//! ```

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::components::animation::Animation;
use crate::components::creature::{Creature, CreatureAnimations, CreatureKind};
use crate::components::powerup::PowerUpKind;
use crate::error::LoadError;
use crate::resources::images::{ImageHandle, ImageProvider, ImageStore, ImageTransform};

pub const DEFAULT_PLATFORM_TILE: char = 'L';
pub const DEFAULT_PROJECTILE_CODE: char = '7';
/// Player spawn tile for maps without an entry in `player_spawns`.
pub const DEFAULT_PLAYER_SPAWN: (i32, i32) = (3, 0);

// ==================== MANIFEST ====================

#[derive(Debug, Deserialize)]
pub struct ImageDef {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct FrameDef {
    pub image: String,
    pub duration_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct CreatureDef {
    pub kind: CreatureKind,
    /// Animation of the left-facing walk cycle.
    pub walk: String,
    /// Animation shown while standing; the walk cycle when absent.
    #[serde(default)]
    pub idle: Option<String>,
    #[serde(default)]
    pub health: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostDef {
    Creature {
        code: char,
        kind: CreatureKind,
        walk: String,
        #[serde(default)]
        idle: Option<String>,
        #[serde(default)]
        health: Option<i32>,
    },
    PowerUp {
        code: char,
        kind: PowerUpKind,
        animation: String,
    },
}

#[derive(Debug, Deserialize)]
pub struct CatalogManifest {
    #[serde(default)]
    pub images: Vec<ImageDef>,
    pub tiles: Vec<String>,
    #[serde(default = "default_platform_tile")]
    pub platform_tile: char,
    #[serde(default)]
    pub animations: FxHashMap<String, Vec<FrameDef>>,
    pub player: CreatureDef,
    #[serde(default)]
    pub hosts: Vec<HostDef>,
    #[serde(default = "default_projectile_code")]
    pub projectile: char,
    #[serde(default)]
    pub player_spawns: FxHashMap<u32, [i32; 2]>,
}

fn default_platform_tile() -> char {
    DEFAULT_PLATFORM_TILE
}

fn default_projectile_code() -> char {
    DEFAULT_PROJECTILE_CODE
}

// ==================== HOSTS ====================

/// Template for a creature.
#[derive(Debug, Clone)]
pub struct CreatureHost {
    pub kind: CreatureKind,
    pub animations: CreatureAnimations,
    pub health: Option<i32>,
}

impl CreatureHost {
    pub fn new(kind: CreatureKind, animations: CreatureAnimations) -> Self {
        Self {
            kind,
            animations,
            health: None,
        }
    }

    /// Fresh creature with its own animation cursors.
    pub fn instantiate(&self, die_time_ms: u64) -> Creature {
        let creature = Creature::new(self.kind, self.animations.clone()).with_die_time(die_time_ms);
        match self.health {
            Some(health) => creature.with_health(health),
            None => creature,
        }
    }
}

/// Template placed by a map character.
#[derive(Debug, Clone)]
pub enum HostSprite {
    Creature(CreatureHost),
    PowerUp {
        kind: PowerUpKind,
        animation: Animation,
    },
}

impl HostSprite {
    /// Pixel size of the first frame, used to place the sprite in its tile.
    pub fn size(&self) -> (u32, u32) {
        let animation = match self {
            HostSprite::Creature(host) => &host.animations.walk_right,
            HostSprite::PowerUp { animation, .. } => animation,
        };
        (animation.width(), animation.height())
    }
}

// ==================== CATALOG ====================

#[derive(Resource, Debug, Clone)]
pub struct ResourceCatalog {
    tiles: Vec<ImageHandle>,
    platform_tile: char,
    hosts: FxHashMap<char, HostSprite>,
    player: CreatureHost,
    projectile: char,
    player_spawns: FxHashMap<u32, (i32, i32)>,
}

impl ResourceCatalog {
    pub fn new(tiles: Vec<ImageHandle>, player: CreatureHost) -> Self {
        Self {
            tiles,
            platform_tile: DEFAULT_PLATFORM_TILE,
            hosts: FxHashMap::default(),
            player,
            projectile: DEFAULT_PROJECTILE_CODE,
            player_spawns: FxHashMap::default(),
        }
    }

    pub fn with_host(mut self, code: char, host: HostSprite) -> Self {
        self.hosts.insert(code, host);
        self
    }

    pub fn with_platform_tile(mut self, code: char) -> Self {
        self.platform_tile = code;
        self
    }

    pub fn with_player_spawn(mut self, map: u32, tile_x: i32, tile_y: i32) -> Self {
        self.player_spawns.insert(map, (tile_x, tile_y));
        self
    }

    /// Read a JSON manifest, registering its images in `images`.
    pub fn load(path: &Path, images: &mut ImageStore) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: CatalogManifest = serde_json::from_str(&text)?;
        for image in &manifest.images {
            images.register(&image.name, image.width, image.height);
        }
        let catalog = Self::from_manifest(&manifest, images)?;
        info!(
            "Loaded catalog {:?}: {} tiles, {} hosts",
            path,
            catalog.tiles.len(),
            catalog.hosts.len()
        );
        Ok(catalog)
    }

    /// Build the catalog, resolving every image through `provider`.
    pub fn from_manifest(
        manifest: &CatalogManifest,
        provider: &mut impl ImageProvider,
    ) -> Result<Self, LoadError> {
        let tiles = manifest
            .tiles
            .iter()
            .map(|name| provider.load_image(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = HostBuilder {
            animations: &manifest.animations,
            provider,
        };
        let player = builder.creature(
            manifest.player.kind,
            &manifest.player.walk,
            manifest.player.idle.as_deref(),
            manifest.player.health,
        )?;

        let mut hosts = FxHashMap::default();
        for def in &manifest.hosts {
            let (code, host) = match def {
                HostDef::Creature {
                    code,
                    kind,
                    walk,
                    idle,
                    health,
                } => (
                    *code,
                    HostSprite::Creature(builder.creature(*kind, walk, idle.as_deref(), *health)?),
                ),
                HostDef::PowerUp {
                    code,
                    kind,
                    animation,
                } => (
                    *code,
                    HostSprite::PowerUp {
                        kind: *kind,
                        animation: builder.animation(animation, None)?,
                    },
                ),
            };
            hosts.insert(code, host);
        }

        Ok(Self {
            tiles,
            platform_tile: manifest.platform_tile,
            hosts,
            player,
            projectile: manifest.projectile,
            player_spawns: manifest
                .player_spawns
                .iter()
                .map(|(map, [x, y])| (*map, (*x, *y)))
                .collect(),
        })
    }

    pub fn tiles(&self) -> &[ImageHandle] {
        &self.tiles
    }

    pub fn platform_tile(&self) -> char {
        self.platform_tile
    }

    /// Tile image for a map character, if it indexes the tile list.
    pub fn tile_for(&self, code: char) -> Option<ImageHandle> {
        let index = (code as u32).checked_sub('A' as u32)?;
        self.tiles.get(index as usize).copied()
    }

    pub fn host(&self, code: char) -> Option<&HostSprite> {
        self.hosts.get(&code)
    }

    pub fn player(&self) -> &CreatureHost {
        &self.player
    }

    /// Host thrown by the player's attack.
    pub fn projectile(&self) -> Option<&HostSprite> {
        self.hosts.get(&self.projectile)
    }

    pub fn player_spawn(&self, map: u32) -> (i32, i32) {
        self.player_spawns
            .get(&map)
            .copied()
            .unwrap_or(DEFAULT_PLAYER_SPAWN)
    }
}

struct HostBuilder<'a, P: ImageProvider> {
    animations: &'a FxHashMap<String, Vec<FrameDef>>,
    provider: &'a mut P,
}

impl<P: ImageProvider> HostBuilder<'_, P> {
    /// Named animation with every frame passed through `transforms`.
    fn animation(
        &mut self,
        name: &str,
        transforms: Option<&[ImageTransform]>,
    ) -> Result<Animation, LoadError> {
        let frames = self
            .animations
            .get(name)
            .ok_or_else(|| LoadError::UnknownAnimation(name.to_string()))?;
        let mut animation = Animation::new();
        for frame in frames {
            let mut image = self.provider.load_image(&frame.image)?;
            for transform in transforms.unwrap_or_default() {
                image = match transform {
                    ImageTransform::Mirror => self.provider.mirror(image),
                    ImageTransform::Flip => self.provider.flip(image),
                };
            }
            animation.add_frame(image, frame.duration_ms);
        }
        Ok(animation)
    }

    fn creature(
        &mut self,
        kind: CreatureKind,
        walk: &str,
        idle: Option<&str>,
        health: Option<i32>,
    ) -> Result<CreatureHost, LoadError> {
        use ImageTransform::{Flip, Mirror};

        let idle = idle.unwrap_or(walk);
        let animations = CreatureAnimations {
            walk_left: self.animation(walk, None)?,
            walk_right: self.animation(walk, Some(&[Mirror]))?,
            dead_left: self.animation(walk, Some(&[Flip]))?,
            dead_right: self.animation(walk, Some(&[Mirror, Flip]))?,
            idle_left: self.animation(idle, None)?,
            idle_right: self.animation(idle, Some(&[Mirror]))?,
        };
        Ok(CreatureHost {
            kind,
            animations,
            health,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "images": [
            { "name": "wall", "width": 64, "height": 64 },
            { "name": "ledge", "width": 64, "height": 64 },
            { "name": "hero1", "width": 40, "height": 60 },
            { "name": "hero2", "width": 40, "height": 60 },
            { "name": "star1", "width": 32, "height": 32 }
        ],
        "tiles": ["wall", "ledge"],
        "platform_tile": "B",
        "animations": {
            "hero": [
                { "image": "hero1", "duration_ms": 250 },
                { "image": "hero2", "duration_ms": 150 }
            ],
            "star": [{ "image": "star1", "duration_ms": 100 }]
        },
        "player": { "kind": "player", "walk": "hero", "health": 5 },
        "hosts": [
            { "type": "creature", "code": "1", "kind": "grub", "walk": "hero" },
            { "type": "power_up", "code": "o", "kind": "star", "animation": "star" }
        ],
        "player_spawns": { "2": [7, 4] }
    }"#;

    fn load() -> (ResourceCatalog, ImageStore) {
        let manifest: CatalogManifest = serde_json::from_str(MANIFEST).unwrap();
        let mut images = ImageStore::new();
        for image in &manifest.images {
            images.register(&image.name, image.width, image.height);
        }
        let catalog = ResourceCatalog::from_manifest(&manifest, &mut images).unwrap();
        (catalog, images)
    }

    #[test]
    fn test_tiles_and_platform_letter() {
        let (catalog, images) = load();
        assert_eq!(catalog.tiles().len(), 2);
        assert_eq!(catalog.tile_for('A'), images.get("wall"));
        assert_eq!(catalog.tile_for('B'), images.get("ledge"));
        assert_eq!(catalog.tile_for('C'), None);
        assert_eq!(catalog.tile_for('1'), None);
        assert_eq!(catalog.platform_tile(), 'B');
    }

    #[test]
    fn test_creature_variants_are_derived() {
        let (catalog, images) = load();
        let player = catalog.player();
        let hero1 = images.get("hero1").unwrap();
        assert_eq!(player.animations.walk_left.current_image(), Some(hero1));
        assert_ne!(player.animations.walk_right.current_image(), Some(hero1));
        assert_ne!(
            player.animations.dead_left.current_image(),
            player.animations.dead_right.current_image()
        );
        assert_eq!(player.animations.walk_right.total_duration(), 400);
        assert_eq!(player.health, Some(5));
    }

    #[test]
    fn test_hosts_by_code() {
        let (catalog, _) = load();
        assert!(matches!(
            catalog.host('1'),
            Some(HostSprite::Creature(host)) if host.kind == CreatureKind::Grub
        ));
        assert!(matches!(
            catalog.host('o'),
            Some(HostSprite::PowerUp { kind: PowerUpKind::Star, .. })
        ));
        assert!(catalog.host('x').is_none());
        assert_eq!(catalog.host('o').unwrap().size(), (32, 32));
    }

    #[test]
    fn test_player_spawns_default() {
        let (catalog, _) = load();
        assert_eq!(catalog.player_spawn(2), (7, 4));
        assert_eq!(catalog.player_spawn(1), DEFAULT_PLAYER_SPAWN);
    }

    #[test]
    fn test_unknown_animation_is_an_error() {
        let json = MANIFEST.replace(r#""walk": "hero", "health""#, r#""walk": "nobody", "health""#);
        let manifest: CatalogManifest = serde_json::from_str(&json).unwrap();
        let mut images = ImageStore::new();
        for image in &manifest.images {
            images.register(&image.name, image.width, image.height);
        }
        let err = ResourceCatalog::from_manifest(&manifest, &mut images).unwrap_err();
        assert!(matches!(err, LoadError::UnknownAnimation(name) if name == "nobody"));
    }

    #[test]
    fn test_unregistered_tile_image_is_an_error() {
        let manifest: CatalogManifest = serde_json::from_str(MANIFEST).unwrap();
        let mut images = ImageStore::new();
        let err = ResourceCatalog::from_manifest(&manifest, &mut images).unwrap_err();
        assert!(matches!(err, LoadError::UnknownImage(name) if name == "wall"));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, MANIFEST).unwrap();
        let mut images = ImageStore::new();
        let catalog = ResourceCatalog::load(&path, &mut images).unwrap();
        assert_eq!(catalog.tiles().len(), 2);
        assert_eq!(images.get("star1").map(|i| i.width()), Some(32));
    }

    #[test]
    fn test_load_missing_file() {
        let mut images = ImageStore::new();
        let err = ResourceCatalog::load(Path::new("/nonexistent/catalog.json"), &mut images)
            .unwrap_err();
        assert!(err.is_missing_file());
    }
}
