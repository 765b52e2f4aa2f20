//! World assembly and the frame schedule.
//!
//! [`Game`] owns a `bevy_ecs` [`World`] holding every resource the systems
//! need, and the [`Schedule`] that advances it one frame per [`Game::tick`].
//! The host (a window, a test, the headless runner) feeds input through
//! [`Game::input_mut`] and reads the result from the world.
//!
//! Frame order:
//!
//! 1. audio message queues are advanced, last frame's commands are forwarded
//!    to the audio thread and its replies are read back;
//! 2. [`level_flow`] applies pending level changes and handles the player's
//!    death; a frame that changes the level stops here;
//! 3. [`player_input`] reads the game actions;
//! 4. unless paused: the player moves, the level's sprites are swept, and
//!    sprites queued meanwhile are spawned;
//! 5. riders follow their targets;
//! 6. creatures the camera shows wake up.

use bevy_ecs::prelude::*;
use log::info;

use crate::error::LoadError;
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::{AudioBackend, setup_audio, shutdown_audio};
use crate::resources::catalog::ResourceCatalog;
use crate::resources::gameconfig::GameConfig;
use crate::resources::images::ImageStore;
use crate::resources::input::InputState;
use crate::resources::levelrequest::{LevelRequest, NextLevel};
use crate::resources::levels::LevelSequencer;
use crate::resources::session::GameSession;
use crate::resources::spawnqueue::SpawnQueue;
use crate::resources::tilemap::TileMap;
use crate::resources::viewport::Viewport;
use crate::resources::worldtime::WorldTime;
use crate::systems::audio::{
    forward_audio_cmds, poll_audio_messages, track_drums, update_bevy_audio_cmds,
    update_bevy_audio_messages,
};
use crate::systems::camera::wake_visible_creatures;
use crate::systems::input::player_input;
use crate::systems::level::{change_level, level_flow, load_first_level};
use crate::systems::player::update_player;
use crate::systems::scene::update_sprites;
use crate::systems::spawn::flush_spawn_queue;
use crate::systems::stuckto::stuck_to_entity_system;
use crate::systems::time::update_world_time;

/// The frame was not spent on a level change and the game is not over.
pub fn frame_active(session: Res<GameSession>) -> bool {
    !session.frame_aborted && !session.game_over
}

/// Sprites move this frame.
pub fn scene_running(session: Res<GameSession>) -> bool {
    session.is_running()
}

/// Insert every resource the schedule reads.
pub fn build_world(config: GameConfig, catalog: ResourceCatalog, images: ImageStore) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(GameSession::new(config.lives));
    world.insert_resource(NextLevel::new());
    world.insert_resource(SpawnQueue::default());
    world.insert_resource(TileMap::default());
    world.insert_resource(Viewport::new(config.viewport_width, config.viewport_height));
    world.insert_resource(LevelSequencer::new(config.maps_dir.clone()));
    world.insert_resource(catalog);
    world.insert_resource(images);
    world.insert_resource(config);
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<AudioMessage>>();
    world
}

pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            // audio systems must be together
            (
                update_bevy_audio_cmds,
                forward_audio_cmds,
                poll_audio_messages,
                update_bevy_audio_messages,
                track_drums,
            )
                .chain(),
            level_flow,
            player_input.run_if(frame_active),
            (update_player, update_sprites, flush_spawn_queue)
                .chain()
                .run_if(scene_running),
            stuck_to_entity_system,
            wake_visible_creatures.run_if(frame_active),
        )
            .chain(),
    );
    update
}

pub struct Game {
    world: World,
    update: Schedule,
}

impl Game {
    pub fn new(config: GameConfig, catalog: ResourceCatalog, images: ImageStore) -> Self {
        Self {
            world: build_world(config, catalog, images),
            update: build_schedule(),
        }
    }

    /// Start the audio thread around `backend`.
    pub fn with_audio(mut self, backend: Box<dyn AudioBackend>) -> Self {
        setup_audio(&mut self.world, backend);
        self
    }

    /// Load the first map, or map `number` when given.
    pub fn start(&mut self, number: Option<u32>) -> Result<(), LoadError> {
        match number {
            Some(number) => change_level(&mut self.world, LevelRequest::Jump(number)),
            None => load_first_level(&mut self.world),
        }
    }

    /// Advance the simulation by `dt_ms` milliseconds.
    pub fn tick(&mut self, dt_ms: u64) {
        update_world_time(&mut self.world, dt_ms);
        self.update.run(&mut self.world);
        self.world.clear_trackers();
    }

    pub fn input_mut(&mut self) -> Mut<'_, InputState> {
        self.world.resource_mut::<InputState>()
    }

    pub fn session(&self) -> &GameSession {
        self.world.resource::<GameSession>()
    }

    pub fn should_quit(&self) -> bool {
        self.session().quit_requested
    }

    /// New game from the current map with full lives.
    pub fn restart(&mut self) {
        info!("Restarting game");
        self.world.resource_mut::<GameSession>().restart();
        self.world
            .resource_mut::<NextLevel>()
            .set(LevelRequest::Reload);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Stop the audio thread, if any.
    pub fn shutdown(mut self) {
        shutdown_audio(&mut self.world);
    }
}
