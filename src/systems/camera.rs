//! Camera-driven behaviour.
//!
//! Creatures start the level standing still and only begin to patrol once
//! the camera has shown them. The camera follows the player, so this runs
//! after everything that moves the player.
use bevy_ecs::prelude::*;

use crate::components::creature::Creature;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::tilemap::TileMap;
use crate::resources::viewport::Viewport;

/// Wake every level creature whose left edge is on screen.
pub fn wake_visible_creatures(
    map: Res<TileMap>,
    viewport: Res<Viewport>,
    mut creatures: Query<(&MapPosition, &Creature, &mut RigidBody)>,
) {
    let Some(player) = map.player() else {
        return;
    };
    let Ok((focus, ..)) = creatures.get(player) else {
        return;
    };
    let camera = viewport.camera_offset(&map, focus);

    for &entity in map.sprites() {
        let Ok((position, creature, mut body)) = creatures.get_mut(entity) else {
            continue;
        };
        if viewport.shows_x(camera, position.x) {
            creature.wake_up(&mut body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::Animation;
    use crate::components::creature::{CreatureAnimations, CreatureKind};

    fn spawn_creature(world: &mut World, kind: CreatureKind, x: f32) -> Entity {
        let creature = Creature::new(kind, CreatureAnimations::walking(
            Animation::new(),
            Animation::new(),
            Animation::new(),
            Animation::new(),
        ));
        world
            .spawn((MapPosition::new(x, 100.0), RigidBody::new(), creature))
            .id()
    }

    #[test]
    fn test_only_visible_creatures_wake() {
        let mut world = World::new();
        let mut map = TileMap::new(50, 10, 64);
        let player = spawn_creature(&mut world, CreatureKind::Player, 100.0);
        let near = spawn_creature(&mut world, CreatureKind::Grub, 500.0);
        let far = spawn_creature(&mut world, CreatureKind::Grub, 2000.0);
        map.set_player(Some(player));
        map.add_sprite(near);
        map.add_sprite(far);
        world.insert_resource(map);
        world.insert_resource(Viewport::new(800, 600));

        let mut schedule = Schedule::default();
        schedule.add_systems(wake_visible_creatures);
        schedule.run(&mut world);

        assert_eq!(world.get::<RigidBody>(near).unwrap().velocity.x, -0.05);
        assert_eq!(world.get::<RigidBody>(far).unwrap().velocity.x, 0.0);
        assert_eq!(world.get::<RigidBody>(player).unwrap().velocity.x, 0.0);
    }
}
