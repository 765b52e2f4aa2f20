//! Keeps sprites with a [`StuckTo`] relation on their target.
//!
//! The relation only names the target entity. When that entity has been
//! despawned (an enemy killed under its rider, a level change) the lookup
//! fails and the relation is removed, leaving the follower where it was.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::mapposition::MapPosition;
use crate::components::stuckto::StuckTo;

/// Move every follower to its target's position plus the captured offset.
pub fn stuck_to_entity_system(
    mut followers: Query<(Entity, &StuckTo, &mut MapPosition)>,
    targets: Query<&MapPosition, Without<StuckTo>>,
    mut commands: Commands,
) {
    for (entity, stuck_to, mut follower_pos) in followers.iter_mut() {
        let Ok(target_pos) = targets.get(stuck_to.target) else {
            debug!("{:?} lost its target {:?}", entity, stuck_to.target);
            commands.entity(entity).remove::<StuckTo>();
            continue;
        };
        if stuck_to.follow_x {
            follower_pos.x = target_pos.x + stuck_to.offset.x;
        }
        if stuck_to.follow_y {
            follower_pos.y = target_pos.y + stuck_to.offset.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(stuck_to_entity_system);
        schedule.run(world);
    }

    #[test]
    fn test_follower_keeps_offset() {
        let mut world = World::new();
        let target = world.spawn(MapPosition::new(100.0, 50.0)).id();
        let rider = world
            .spawn((
                MapPosition::new(0.0, 0.0),
                StuckTo::new(target).with_offset(Vec2::new(10.0, -64.0)),
            ))
            .id();

        run(&mut world);
        assert_eq!(*world.get::<MapPosition>(rider).unwrap(), MapPosition::new(110.0, -14.0));

        world.get_mut::<MapPosition>(target).unwrap().x = 200.0;
        run(&mut world);
        assert_eq!(world.get::<MapPosition>(rider).unwrap().x, 210.0);
    }

    #[test]
    fn test_follow_x_only_leaves_y() {
        let mut world = World::new();
        let target = world.spawn(MapPosition::new(300.0, 300.0)).id();
        let rider = world
            .spawn((MapPosition::new(0.0, 40.0), StuckTo::follow_x_only(target)))
            .id();
        run(&mut world);
        assert_eq!(*world.get::<MapPosition>(rider).unwrap(), MapPosition::new(300.0, 40.0));
    }

    #[test]
    fn test_relation_dropped_when_target_despawned() {
        let mut world = World::new();
        let target = world.spawn(MapPosition::new(100.0, 50.0)).id();
        let follower = MapPosition::new(90.0, 40.0);
        let target_pos = MapPosition::new(100.0, 50.0);
        let rider = world
            .spawn((follower, StuckTo::capture(target, &follower, &target_pos)))
            .id();
        world.despawn(target);

        run(&mut world);
        assert!(world.get::<StuckTo>(rider).is_none());
        assert_eq!(*world.get::<MapPosition>(rider).unwrap(), follower);
    }
}
