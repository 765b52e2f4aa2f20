//! Level flow: loading maps and reacting to the player's death.
//!
//! [`level_flow`] runs first every frame. A frame that changes the level (a
//! pending [`NextLevel`] request, or a reload after the player died) does
//! nothing else: the session's `frame_aborted` flag is raised and the rest of
//! the schedule skips its work.
//!
//! Loading is done with exclusive access to the [`World`] because it
//! replaces the [`TileMap`] resource and respawns every sprite.

use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::components::creature::{Creature, CreatureState};
use crate::error::LoadError;
use crate::resources::catalog::ResourceCatalog;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::levelrequest::{LevelRequest, NextLevel};
use crate::resources::levels::{LevelLayout, LevelSequencer};
use crate::resources::session::GameSession;
use crate::resources::spawnqueue::SpawnQueue;
use crate::resources::tilemap::TileMap;
use crate::systems::spawn::{HostBundle, placement_position, spawn_player};

pub fn level_flow(world: &mut World) {
    world.resource_mut::<GameSession>().frame_aborted = false;
    if world.resource::<GameSession>().game_over {
        abort_frame(world);
        return;
    }

    if let Some(request) = world.resource_mut::<NextLevel>().take() {
        // a failed load keeps the current level running
        let _ = change_level(world, request);
        abort_frame(world);
        return;
    }

    let player_dead = world
        .resource::<TileMap>()
        .player()
        .and_then(|player| world.get::<Creature>(player))
        .is_some_and(|creature| creature.state() == CreatureState::Dead);
    if player_dead {
        let lives = world.resource::<GameSession>().lives;
        if lives > 0 {
            info!("Player lost a life, {} left", lives);
            // a map that can no longer be read is skipped
            if change_level(world, LevelRequest::Reload).is_err()
                && change_level(world, LevelRequest::Next).is_err()
            {
                warn!("No map left to continue on");
                world.resource_mut::<GameSession>().game_over = true;
            }
        } else {
            info!("Game over");
            world.resource_mut::<GameSession>().game_over = true;
        }
        abort_frame(world);
    }
}

fn abort_frame(world: &mut World) {
    world.resource_mut::<GameSession>().frame_aborted = true;
}

/// Load the first map. Call once after the resources are inserted.
pub fn load_first_level(world: &mut World) -> Result<(), LoadError> {
    change_level(world, LevelRequest::Next)
}

/// Apply a level request now.
///
/// On failure the error is logged and returned, and the current level is
/// left untouched.
pub fn change_level(world: &mut World, request: LevelRequest) -> Result<(), LoadError> {
    let result = world.resource_scope(|world, mut levels: Mut<LevelSequencer>| {
        let catalog = world.resource::<ResourceCatalog>();
        let tile_size = world.resource::<GameConfig>().tile_size;
        match request {
            LevelRequest::Reload => levels.reload(catalog, tile_size),
            LevelRequest::Next => levels.load_next(catalog, tile_size),
            LevelRequest::Jump(number) => levels.jump_to(number, catalog, tile_size),
        }
    });

    match result {
        Ok(layout) => {
            install_level(world, layout);
            Ok(())
        }
        Err(err) => {
            warn!("Level change {:?} failed: {}", request, err);
            Err(err)
        }
    }
}

/// Replace the current level with `layout`.
///
/// Every sprite of the old level is despawned, the new map becomes the
/// [`TileMap`] resource, its hosts are spawned in map order and the player is
/// placed on its spawn tile.
pub fn install_level(world: &mut World, layout: LevelLayout) {
    let old = world.resource_mut::<TileMap>().take_entities();
    for entity in old {
        if !world.despawn(entity) {
            debug!("{:?} was already gone", entity);
        }
    }

    let LevelLayout {
        number,
        map,
        placements,
        player_spawn,
    } = layout;
    world.insert_resource(map);

    let config = world.resource::<GameConfig>().clone();
    for placement in &placements {
        let position = placement_position(world.resource::<TileMap>(), placement);
        let entity = HostBundle::new(
            &placement.host,
            position,
            glam::Vec2::ZERO,
            config.die_time_ms,
        )
        .spawn_in(world);
        world.resource_mut::<TileMap>().add_sprite(entity);
    }

    let host = world.resource::<ResourceCatalog>().player().clone();
    let player = spawn_player(world, &host, player_spawn, &config);
    world.resource_mut::<TileMap>().set_player(Some(player));

    world.resource_mut::<SpawnQueue>().clear();
    world.resource_mut::<InputState>().reset_all();
    world.resource_mut::<GameSession>().attack_ready = true;

    info!(
        "Map {} ready: {} sprites, player at tile {:?}",
        number,
        placements.len(),
        player_spawn
    );
}
