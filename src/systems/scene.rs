//! The per-frame sweep over the level's sprites.
//!
//! Every sprite in the level list is visited once, in list order:
//!
//! 1. a live creature whose health is used up starts dying and makes the
//!    death sound (once, since it is no longer alive afterwards);
//! 2. a dead creature is marked for removal and skipped;
//! 3. live and dying creatures fall, then move along X, then along Y;
//! 4. projectiles resolve their hits;
//! 5. anything that dropped below the map starts dying;
//! 6. animations and life-cycle timers advance.
//!
//! Removals are collected during the sweep and applied after it, so the list
//! is never edited while it is being walked.

use bevy_ecs::prelude::*;
use log::debug;
use smallvec::SmallVec;

use crate::components::creature::CreatureState;
use crate::events::audio::{AudioCmd, sounds};
use crate::resources::gameconfig::GameConfig;
use crate::resources::tilemap::TileMap;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{Footprint, SpriteQuery, find_sprite_collision, tile_collision};
use crate::systems::movement::{
    MoveParams, apply_gravity, fell_off_map, move_horizontal, move_vertical,
};

pub fn update_sprites(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    mut map: ResMut<TileMap>,
    mut sprites: SpriteQuery,
    mut commands: Commands,
    mut audio: MessageWriter<AudioCmd>,
) {
    let params = MoveParams::new(&config, time.delta);
    let snapshot: SmallVec<[Entity; 32]> = map.sprites().iter().copied().collect();
    let mut removed: SmallVec<[Entity; 8]> = SmallVec::new();

    for entity in snapshot {
        let is_weapon = match sprites.get_mut(entity) {
            Err(_) => {
                removed.push(entity);
                continue;
            }
            Ok((mut position, mut body, mut sprite, creature, _, weapon, _)) => {
                let Some(mut creature) = creature else {
                    sprite.animation.update(time.delta);
                    continue;
                };
                if creature.health() <= 0 && creature.is_alive() {
                    audio.write(AudioCmd::fx(sounds::ENEMY_DEATH));
                    creature.set_state(CreatureState::Dying, &mut body);
                }
                if creature.state() == CreatureState::Dead {
                    removed.push(entity);
                    continue;
                }
                apply_gravity(&params, &creature, &mut body);
                move_horizontal(&params, &map, &mut position, &mut body, &sprite, &creature);
                move_vertical(&params, &map, &mut position, &mut body, &sprite, &creature, None);
                weapon.is_some()
            }
        };

        if is_weapon {
            resolve_projectile(entity, &map, &params, &mut sprites, &mut audio);
        }

        if let Ok((position, mut body, mut sprite, Some(mut creature), ..)) = sprites.get_mut(entity)
        {
            if fell_off_map(&map, &position) && creature.state() == CreatureState::Normal {
                creature.set_state(CreatureState::Dying, &mut body);
                creature.set_health(0);
            }
            creature.update(time.delta, &mut body, &mut sprite);
        }
    }

    if !removed.is_empty() {
        debug!("Removing {} sprites", removed.len());
        map.remove_sprites(&removed);
        for entity in removed {
            commands.entity(entity).try_despawn();
        }
    }
}

/// Damage the first sprite a live projectile touches, and retire the
/// projectile once it has stopped or is about to hit a tile.
pub fn resolve_projectile(
    entity: Entity,
    map: &TileMap,
    params: &MoveParams,
    sprites: &mut SpriteQuery,
    audio: &mut MessageWriter<AudioCmd>,
) {
    let (bounds, alive) = match sprites.get(entity) {
        Ok((position, _, sprite, Some(creature), ..)) => {
            (sprite.bounds_at(position), creature.is_alive())
        }
        _ => return,
    };

    if alive {
        if let Some(target) = find_sprite_collision(sprites, map.sprites(), entity, bounds) {
            if let Ok((.., Some(mut victim), _, _, _)) = sprites.get_mut(target) {
                victim.damage(1);
                audio.write(AudioCmd::fx(sounds::ARROW_HIT));
            } else {
                audio.write(AudioCmd::fx(sounds::BOSS_IMMUNE));
            }
            if let Ok((_, mut body, ..)) = sprites.get_mut(entity) {
                body.velocity.x = 0.0;
            }
        }
    }

    let Ok((position, mut body, sprite, Some(mut creature), ..)) = sprites.get_mut(entity) else {
        return;
    };
    let footprint = Footprint::of(&position, &sprite);
    let next = position.as_vec2() + body.velocity;
    let blocked = tile_collision(map, &footprint, next.x, next.y, params.platform_tolerance);
    if body.velocity.x == 0.0 || blocked.is_some() {
        creature.set_state(CreatureState::Dying, &mut body);
    }
}
