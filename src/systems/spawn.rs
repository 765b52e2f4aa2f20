//! Turning catalog hosts into entities.
//!
//! Every sprite shares the [`SpriteBundle`] (position, velocity, animation).
//! Creatures add a [`Creature`], projectiles a [`Weapon`] marker on top, and
//! power-ups a [`PowerUp`]. The same bundles are spawned from the exclusive
//! level loader (through `&mut World`) and from [`flush_spawn_queue`]
//! (through [`Commands`]).

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::creature::{Creature, CreatureKind};
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::powerup::PowerUp;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::components::weapon::Weapon;
use crate::resources::catalog::{CreatureHost, HostSprite};
use crate::resources::gameconfig::GameConfig;
use crate::resources::levels::Placement;
use crate::resources::spawnqueue::SpawnQueue;
use crate::resources::tilemap::TileMap;

#[derive(Bundle, Debug, Clone)]
pub struct SpriteBundle {
    pub position: MapPosition,
    pub body: RigidBody,
    pub sprite: Sprite,
}

/// Everything one host turns into.
#[derive(Debug, Clone)]
pub enum HostBundle {
    Creature {
        base: SpriteBundle,
        creature: Creature,
        weapon: Option<Weapon>,
    },
    PowerUp {
        base: SpriteBundle,
        power_up: PowerUp,
    },
}

impl HostBundle {
    /// Bundle for `host` with its top-left corner at `position`.
    pub fn new(host: &HostSprite, position: Vec2, velocity: Vec2, die_time_ms: u64) -> Self {
        let position = MapPosition::new(position.x, position.y);
        let body = RigidBody::with_velocity(velocity);
        match host {
            HostSprite::Creature(host) => {
                let creature = host.instantiate(die_time_ms);
                let weapon = (host.kind == CreatureKind::Weapon).then_some(Weapon {
                    downward: velocity.y > 0.0,
                });
                HostBundle::Creature {
                    base: SpriteBundle {
                        position,
                        body,
                        sprite: creature.initial_sprite(),
                    },
                    creature,
                    weapon,
                }
            }
            HostSprite::PowerUp { kind, animation } => {
                let mut animation = animation.clone();
                animation.start();
                HostBundle::PowerUp {
                    base: SpriteBundle {
                        position,
                        body,
                        sprite: Sprite::new(animation),
                    },
                    power_up: PowerUp::new(*kind),
                }
            }
        }
    }

    pub fn spawn(self, commands: &mut Commands) -> Entity {
        match self {
            HostBundle::Creature {
                base,
                creature,
                weapon: Some(weapon),
            } => commands.spawn((base, creature, weapon)).id(),
            HostBundle::Creature {
                base,
                creature,
                weapon: None,
            } => commands.spawn((base, creature)).id(),
            HostBundle::PowerUp { base, power_up } => commands.spawn((base, power_up)).id(),
        }
    }

    pub fn spawn_in(self, world: &mut World) -> Entity {
        match self {
            HostBundle::Creature {
                base,
                creature,
                weapon: Some(weapon),
            } => world.spawn((base, creature, weapon)).id(),
            HostBundle::Creature {
                base,
                creature,
                weapon: None,
            } => world.spawn((base, creature)).id(),
            HostBundle::PowerUp { base, power_up } => world.spawn((base, power_up)).id(),
        }
    }
}

/// Top-left corner of a placed host: centred in its cell, standing on the
/// cell's bottom edge.
pub fn placement_position(map: &TileMap, placement: &Placement) -> Vec2 {
    let (width, height) = placement.host.size();
    let tile = map.tile_size();
    let x = map.tiles_to_pixels(placement.tile_x) + (tile - width as i32) / 2;
    let y = map.tiles_to_pixels(placement.tile_y + 1) - height as i32;
    Vec2::new(x as f32, y as f32)
}

/// Spawn the player at the top-left corner of tile `spawn`.
pub fn spawn_player(
    world: &mut World,
    host: &CreatureHost,
    spawn: (i32, i32),
    config: &GameConfig,
) -> Entity {
    let (position, creature) = {
        let map = world.resource::<TileMap>();
        let position = MapPosition::new(
            map.tiles_to_pixels(spawn.0) as f32,
            map.tiles_to_pixels(spawn.1) as f32,
        );
        let creature = host
            .instantiate(config.die_time_ms)
            .with_health(config.player_health);
        (position, creature)
    };
    let base = SpriteBundle {
        position,
        body: RigidBody::new(),
        sprite: creature.initial_sprite(),
    };
    let player = Player::new(config.jump_speed, config.jump_height);
    world.spawn((base, creature, player)).id()
}

/// Add the sprites queued during the frame to the level.
pub fn flush_spawn_queue(
    config: Res<GameConfig>,
    mut queue: ResMut<SpawnQueue>,
    mut map: ResMut<TileMap>,
    mut commands: Commands,
) {
    for request in queue.drain() {
        let bundle = HostBundle::new(
            &request.host,
            request.position,
            request.velocity,
            config.die_time_ms,
        );
        let entity = bundle.spawn(&mut commands);
        map.add_sprite(entity);
        debug!("Spawned {:?} at {:?}", entity, request.position);
    }
}
