//! Player movement and contact with other sprites.
//!
//! The player is not part of the level's sprite list; this system moves it
//! before the scene sweep. Contacts are checked twice per frame, once after
//! the horizontal move and once after the vertical move. Only the second
//! check may count as a stomp: the player must have been moving down.
//!
//! Touching a power-up consumes it. Touching a live enemy hurts the player
//! unless it is a stomp, which hurts the enemy and bounces the player up.
//! The player's own projectiles are harmless to it.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::creature::CreatureState;
use crate::components::powerup::PowerUpKind;
use crate::events::audio::{AudioCmd, sounds};
use crate::resources::gameconfig::GameConfig;
use crate::resources::levelrequest::{LevelRequest, NextLevel};
use crate::resources::session::GameSession;
use crate::resources::tilemap::TileMap;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{SpriteQuery, find_sprite_collision};
use crate::systems::movement::{
    MoveParams, apply_gravity, fell_off_map, move_horizontal, move_vertical,
};

/// Echo applied to the prize sound when the goal is reached.
pub const GOAL_ECHO_DELAY_SAMPLES: u32 = 2000;
pub const GOAL_ECHO_DECAY: f32 = 0.7;
/// Score for a star or a stomp.
pub const SCORE_BONUS: u32 = 10;

/// Everything a contact can change besides the sprites themselves.
///
/// Sounds and consumed entities are collected and flushed once the player
/// has been updated.
pub struct ContactContext<'a> {
    pub map: &'a mut TileMap,
    pub session: &'a mut GameSession,
    pub next_level: &'a mut NextLevel,
    pub sounds: Vec<AudioCmd>,
    pub consumed: Vec<Entity>,
}

impl<'a> ContactContext<'a> {
    pub fn new(
        map: &'a mut TileMap,
        session: &'a mut GameSession,
        next_level: &'a mut NextLevel,
    ) -> Self {
        Self {
            map,
            session,
            next_level,
            sounds: Vec::new(),
            consumed: Vec::new(),
        }
    }
}

pub fn update_player(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    mut map: ResMut<TileMap>,
    mut session: ResMut<GameSession>,
    mut next_level: ResMut<NextLevel>,
    mut sprites: SpriteQuery,
    mut commands: Commands,
    mut audio: MessageWriter<AudioCmd>,
) {
    let Some(player) = map.player() else {
        return;
    };
    let params = MoveParams::new(&config, time.delta);

    {
        let Ok((mut position, mut body, sprite, Some(creature), ..)) = sprites.get_mut(player)
        else {
            return;
        };
        apply_gravity(&params, &creature, &mut body);
        move_horizontal(&params, &map, &mut position, &mut body, &sprite, &creature);
    }

    let mut ctx = ContactContext::new(&mut map, &mut session, &mut next_level);
    check_player_collision(player, false, &mut sprites, &mut ctx);

    let can_kill = match sprites.get_mut(player) {
        Ok((mut position, mut body, sprite, Some(creature), _, _, player_state)) => {
            let old_y = position.y;
            move_vertical(
                &params,
                ctx.map,
                &mut position,
                &mut body,
                &sprite,
                &creature,
                player_state.map(|p| p.into_inner()),
            );
            old_y < position.y
        }
        _ => false,
    };
    check_player_collision(player, can_kill, &mut sprites, &mut ctx);

    if let Ok((position, mut body, mut sprite, Some(mut creature), ..)) = sprites.get_mut(player) {
        if fell_off_map(ctx.map, &position) && creature.state() == CreatureState::Normal {
            info!("Player fell off the map");
            creature.set_state(CreatureState::Dying, &mut body);
            creature.set_health(0);
            ctx.session.lose_life();
        }
        creature.update(time.delta, &mut body, &mut sprite);
    }

    audio.write_batch(ctx.sounds);
    for entity in ctx.consumed {
        commands.entity(entity).try_despawn();
    }
}

/// Resolve the player's first contact with a level sprite.
pub fn check_player_collision(
    player: Entity,
    can_kill: bool,
    sprites: &mut SpriteQuery,
    ctx: &mut ContactContext,
) {
    let bounds = match sprites.get(player) {
        Ok((position, _, sprite, Some(creature), ..)) if creature.is_alive() => {
            sprite.bounds_at(position)
        }
        _ => return,
    };
    let Some(other) = find_sprite_collision(sprites, ctx.map.sprites(), player, bounds) else {
        return;
    };
    let Ok((other_pos, _, _, other_creature, power_up, weapon, _)) = sprites.get(other) else {
        return;
    };
    let other_top = other_pos.y;
    let is_creature = other_creature.is_some();
    let power_up = power_up.map(|p| p.kind);
    let is_weapon = weapon.is_some();

    if let Some(kind) = power_up {
        acquire_power_up(other, kind, ctx);
        ctx.session.attack_ready = true;
    } else if is_creature && !is_weapon {
        if can_kill {
            stomp(player, other, other_top, sprites, ctx);
        } else {
            hurt_player(player, sprites, ctx);
        }
    }
}

fn acquire_power_up(entity: Entity, kind: PowerUpKind, ctx: &mut ContactContext) {
    ctx.map.remove_sprite(entity);
    ctx.consumed.push(entity);

    match kind {
        PowerUpKind::Star => {
            ctx.session.score += SCORE_BONUS;
            ctx.sounds.push(AudioCmd::fx(sounds::PRIZE));
        }
        PowerUpKind::Music => {
            ctx.sounds.push(AudioCmd::fx(sounds::PRIZE));
            ctx.sounds.push(AudioCmd::ToggleDrums);
        }
        PowerUpKind::Goal => {
            ctx.sounds.push(AudioCmd::fx_with_echo(
                sounds::PRIZE,
                GOAL_ECHO_DELAY_SAMPLES,
                GOAL_ECHO_DECAY,
            ));
            ctx.next_level.set(LevelRequest::Next);
            info!("Goal reached");
        }
    }
    debug!("Acquired {:?}", kind);
}

fn stomp(
    player: Entity,
    enemy: Entity,
    enemy_top: f32,
    sprites: &mut SpriteQuery,
    ctx: &mut ContactContext,
) {
    if let Ok((.., Some(mut creature), _, _, _)) = sprites.get_mut(enemy) {
        creature.damage(1);
    }
    if let Ok((mut position, mut body, sprite, _, _, _, Some(mut state))) = sprites.get_mut(player)
    {
        position.y = enemy_top - sprite.height() as f32;
        state.jump(true, &position, &mut body);
    }
    ctx.session.score += SCORE_BONUS;
    ctx.sounds.push(AudioCmd::fx(sounds::BOOP));
}

fn hurt_player(player: Entity, sprites: &mut SpriteQuery, ctx: &mut ContactContext) {
    let Ok((_, mut body, _, Some(mut creature), ..)) = sprites.get_mut(player) else {
        return;
    };
    if creature.damage(1) < 1 {
        creature.set_state(CreatureState::Dying, &mut body);
        ctx.session.lose_life();
        info!("Player died, {} lives left", ctx.session.lives);
    }
}
