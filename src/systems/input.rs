//! Player controls.
//!
//! [`player_input`] turns the logical actions in
//! [`InputState`](crate::resources::input::InputState) into player intent:
//! horizontal velocity, jump, attack and pause. It runs before any movement,
//! so the velocities it sets are the ones integrated this frame.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};

use crate::components::creature::Creature;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::events::audio::{AudioCmd, sounds};
use crate::resources::catalog::{HostSprite, ResourceCatalog};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::session::GameSession;
use crate::resources::spawnqueue::{SpawnQueue, SpawnRequest};
use crate::resources::tilemap::TileMap;
use crate::resources::worldtime::WorldTime;

/// Horizontal gap between the player's reach and a thrown projectile.
pub const THROW_GAP: f32 = 15.0;
/// Launch velocity of a thrown projectile, pointing right.
pub const THROW_VELOCITY: Vec2 = Vec2::new(1.0, -0.2);

#[allow(clippy::too_many_arguments)]
pub fn player_input(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    catalog: Res<ResourceCatalog>,
    map: Res<TileMap>,
    mut input: ResMut<InputState>,
    mut session: ResMut<GameSession>,
    mut spawns: ResMut<SpawnQueue>,
    mut players: Query<(&MapPosition, &mut RigidBody, &mut Creature, &mut Player)>,
    mut audio: MessageWriter<AudioCmd>,
) {
    if input.exit.is_pressed() {
        info!("Exit requested");
        session.quit_requested = true;
    }
    if input.pause.is_pressed() {
        session.paused = !session.paused;
        let sound = if session.paused {
            sounds::PAUSE_ON
        } else {
            sounds::PAUSE_OFF
        };
        audio.write(AudioCmd::fx(sound));
        debug!("Paused: {}", session.paused);
    }
    if session.paused {
        return;
    }

    let Some(entity) = map.player() else {
        return;
    };
    let Ok((position, mut body, mut creature, mut player)) = players.get_mut(entity) else {
        return;
    };
    if !creature.is_alive() {
        return;
    }

    let mut velocity_x = 0.0;
    if input.move_left.is_pressed() {
        velocity_x -= creature.max_speed();
        player.facing_right = false;
    }
    if input.move_right.is_pressed() {
        velocity_x += creature.max_speed();
        player.facing_right = true;
    }

    if input.jump.is_pressed() {
        player.jump(false, position, &mut body);
    } else {
        player.release_jump();
    }

    if input.attack.is_pressed() {
        let now = time.elapsed;
        if !session.attack_ready
            && creature
                .last_attack_ms()
                .is_none_or(|last| now >= last + config.attack_cooldown_ms)
        {
            session.attack_ready = true;
        }
        if session.attack_ready {
            session.attack_ready = false;
            creature.mark_attack(now);
            audio.write(AudioCmd::fx(sounds::PLAYER_SHOOT));
            if let Some(host) = catalog.projectile() {
                spawns.push(throw(host.clone(), position, map.tile_size(), player.facing_right));
            }
        }
    }

    body.velocity.x = velocity_x;
}

/// Projectile launched one tile ahead of the player, at foot height.
fn throw(
    host: HostSprite,
    position: &MapPosition,
    tile_size: i32,
    facing_right: bool,
) -> SpawnRequest {
    let reach = tile_size as f32 + THROW_GAP;
    let (dx, velocity) = if facing_right {
        (reach, THROW_VELOCITY)
    } else {
        (-reach, Vec2::new(-THROW_VELOCITY.x, THROW_VELOCITY.y))
    };
    SpawnRequest {
        host,
        position: Vec2::new(position.x + dx, position.y + tile_size as f32),
        velocity,
    }
}
