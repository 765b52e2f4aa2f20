//! Frame-by-frame tests of the full schedule: levels on disk, the player, and
//! the creatures and items it meets.

#![allow(dead_code)]

use bevy_ecs::prelude::*;
use glam::Vec2;

use tilequest::components::animation::Animation;
use tilequest::components::creature::{Creature, CreatureAnimations, CreatureKind, CreatureState};
use tilequest::components::mapposition::MapPosition;
use tilequest::components::player::Player;
use tilequest::components::powerup::PowerUpKind;
use tilequest::components::rigidbody::RigidBody;
use tilequest::components::weapon::Weapon;
use tilequest::events::audio::{AudioCmd, sounds};
use tilequest::game::Game;
use tilequest::resources::catalog::{CreatureHost, HostSprite, ResourceCatalog};
use tilequest::resources::gameconfig::GameConfig;
use tilequest::resources::images::{ImageHandle, ImageStore};
use tilequest::resources::levels::LevelSequencer;
use tilequest::resources::tilemap::TileMap;
use tilequest::systems::player::{GOAL_ECHO_DECAY, GOAL_ECHO_DELAY_SAMPLES};

const STEP_MS: u64 = 16;
const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// Player is 40x120, grubs 64x32, items 32x32. Floor rows sit at y = 256.

fn anim(id: u32, width: u32, height: u32) -> Animation {
    Animation::from_frames([(ImageHandle::new(id, width, height), 100)])
}

fn creature_host(kind: CreatureKind, id: u32, width: u32, height: u32) -> CreatureHost {
    CreatureHost::new(
        kind,
        CreatureAnimations::walking(
            anim(id, width, height),
            anim(id + 1, width, height),
            anim(id + 2, width, height),
            anim(id + 3, width, height),
        ),
    )
}

fn item(kind: PowerUpKind, id: u32) -> HostSprite {
    HostSprite::PowerUp {
        kind,
        animation: anim(id, 32, 32),
    }
}

fn catalog() -> ResourceCatalog {
    let tiles = (0..4).map(|i| ImageHandle::new(i, 64, 64)).collect();
    ResourceCatalog::new(tiles, creature_host(CreatureKind::Player, 10, 40, 120))
        .with_platform_tile('B')
        .with_host('1', HostSprite::Creature(creature_host(CreatureKind::Grub, 20, 64, 32)))
        .with_host('7', HostSprite::Creature(creature_host(CreatureKind::Weapon, 30, 40, 12)))
        .with_host('o', item(PowerUpKind::Star, 40))
        .with_host('!', item(PowerUpKind::Music, 41))
        .with_host('*', item(PowerUpKind::Goal, 42))
}

struct Harness {
    game: Game,
    sounds: Schedule,
    _dir: tempfile::TempDir,
}

#[derive(Resource, Default)]
struct Heard(Vec<AudioCmd>);

fn record_sounds(mut reader: MessageReader<AudioCmd>, mut heard: ResMut<Heard>) {
    heard.0.extend(reader.read().cloned());
}

impl Harness {
    fn new(maps: &[&str]) -> Self {
        Self::with_config(maps, GameConfig::new())
    }

    fn with_config(maps: &[&str], mut config: GameConfig) -> Self {
        let dir = tempfile::tempdir().unwrap();
        for (i, text) in maps.iter().enumerate() {
            std::fs::write(dir.path().join(format!("map{}.txt", i + 1)), text).unwrap();
        }
        config.maps_dir = dir.path().to_path_buf();
        let mut game = Game::new(config, catalog(), ImageStore::new());
        game.start(None).unwrap();
        game.world_mut().init_resource::<Heard>();

        let mut sounds = Schedule::default();
        sounds.add_systems(record_sounds);
        Self {
            game,
            sounds,
            _dir: dir,
        }
    }

    fn tick(&mut self, frames: usize) {
        for _ in 0..frames {
            self.game.tick(STEP_MS);
            self.sounds.run(self.game.world_mut());
        }
    }

    fn heard(&self) -> &[AudioCmd] {
        &self.game.world().resource::<Heard>().0
    }

    fn map(&self) -> &TileMap {
        self.game.world().resource::<TileMap>()
    }

    fn player(&self) -> Entity {
        self.map().player().unwrap()
    }

    fn position(&self, entity: Entity) -> MapPosition {
        *self.game.world().get::<MapPosition>(entity).unwrap()
    }

    fn creature(&self, entity: Entity) -> &Creature {
        self.game.world().get::<Creature>(entity).unwrap()
    }

    fn place(&mut self, entity: Entity, x: f32, y: f32, velocity: Vec2) {
        let world = self.game.world_mut();
        *world.get_mut::<MapPosition>(entity).unwrap() = MapPosition::new(x, y);
        world.get_mut::<RigidBody>(entity).unwrap().velocity = velocity;
    }

    fn weapons(&mut self) -> usize {
        let world = self.game.world_mut();
        world.query::<&Weapon>().iter(world).count()
    }
}

/// 16 columns, floor on row 4, `row3` placed just above the floor.
fn floor_map(row3: &str) -> String {
    format!("{:16}\n\n\n{:16}\nAAAAAAAAAAAAAAAA\n", "", row3)
}

// ==================== MOVEMENT TESTS ====================

#[test]
fn test_player_falls_and_rests_on_floor() {
    let mut h = Harness::new(&[&floor_map("")]);
    let player = h.player();
    assert_eq!(h.position(player), MapPosition::new(192.0, 0.0));

    h.tick(120);
    let y = h.position(player).y;
    assert!((136.0..137.0).contains(&y), "player rests at {y}");
    assert!(h.game.world().get::<Player>(player).unwrap().is_on_ground());
    assert!(h.creature(player).is_alive());
}

#[test]
fn test_player_walks_into_wall_and_stops_flush() {
    let text = "        A\n        A\n        A\n        A\nAAAAAAAAAAAAAAAA\n";
    let mut h = Harness::new(&[text]);
    let player = h.player();

    for _ in 0..120 {
        h.game.input_mut().move_right.press(1);
        h.tick(1);
    }
    // wall column 8 starts at x = 512
    assert_eq!(h.position(player).x, 472.0);
}

#[test]
fn test_platform_catches_falling_player() {
    let text = "\n\n   B\n\nAAAAAAAAAAAAAAAA\n";
    let mut h = Harness::new(&[text]);
    let player = h.player();
    h.place(player, 192.0, 0.0, Vec2::ZERO);

    h.tick(120);
    // platform row 2 starts at y = 128
    let y = h.position(player).y;
    assert!((8.0..9.0).contains(&y), "player rests at {y}");
}

#[test]
fn test_falling_off_the_map_costs_a_life() {
    let mut h = Harness::new(&[&format!("{:16}\n\n", "")]);
    let player = h.player();

    h.tick(50);
    assert_eq!(h.creature(player).state(), CreatureState::Dying);
    assert_eq!(h.game.session().lives, 1);
}

#[test]
fn test_pause_freezes_the_scene() {
    let mut h = Harness::new(&[&floor_map("")]);
    let player = h.player();
    h.tick(5);

    h.game.input_mut().pause.tap();
    h.tick(1);
    assert!(h.game.session().paused);
    let frozen = h.position(player);
    h.tick(10);
    assert_eq!(h.position(player), frozen);

    h.game.input_mut().pause.tap();
    h.tick(2);
    assert!(!h.game.session().paused);
    assert!(h.position(player).y > frozen.y);
    assert!(h.heard().contains(&AudioCmd::fx(sounds::PAUSE_ON)));
    assert!(h.heard().contains(&AudioCmd::fx(sounds::PAUSE_OFF)));
}

// ==================== CREATURE TESTS ====================

#[test]
fn test_visible_grub_wakes_and_bounces_off_map_edge() {
    let mut h = Harness::new(&[&floor_map(" 1")]);
    let grub = h.map().sprites()[0];
    assert_eq!(h.position(grub).x, 64.0);

    h.tick(1);
    assert!(approx_eq(h.game.world().get::<RigidBody>(grub).unwrap().velocity.x, -0.05));

    // 64 px at 0.8 px per frame reaches the left edge
    h.tick(100);
    assert!(approx_eq(h.game.world().get::<RigidBody>(grub).unwrap().velocity.x, 0.05));
}

#[test]
fn test_stomping_a_grub_twice_kills_it() {
    let mut h = Harness::new(&[&floor_map("   1")]);
    let player = h.player();
    let grub = h.map().sprites()[0];
    assert_eq!(h.position(grub), MapPosition::new(192.0, 224.0));

    h.place(player, 192.0, 99.0, Vec2::new(0.0, 0.5));
    h.tick(1);
    assert_eq!(h.creature(grub).health(), 1);
    assert_eq!(h.position(player).y, 104.0);
    assert_eq!(h.game.world().get::<RigidBody>(player).unwrap().velocity.y, -0.4);
    assert_eq!(h.game.session().score, 10);
    assert!(h.heard().contains(&AudioCmd::fx(sounds::BOOP)));

    h.place(player, 192.0, 99.0, Vec2::new(0.0, 0.5));
    h.tick(1);
    assert_eq!(h.creature(grub).state(), CreatureState::Dying);
    assert_eq!(h.game.session().score, 20);
    assert!(h.heard().contains(&AudioCmd::fx(sounds::ENEMY_DEATH)));
    assert!(h.creature(player).is_alive());

    h.tick(80);
    assert!(h.map().sprites().is_empty());
    assert!(h.game.world().get_entity(grub).is_err());
}

#[test]
fn test_touching_a_grub_hurts_then_reload_then_game_over() {
    let mut config = GameConfig::new();
    config.player_health = 1;
    let mut h = Harness::with_config(&[&floor_map("   1")], config);
    let first = h.player();

    h.place(first, 192.0, 120.0, Vec2::ZERO);
    h.tick(1);
    assert_eq!(h.creature(first).state(), CreatureState::Dying);
    assert_eq!(h.game.session().lives, 1);

    h.tick(80);
    let second = h.player();
    assert_ne!(first, second);
    assert!(h.creature(second).is_alive());
    assert!(!h.game.session().game_over);

    let grub = h.map().sprites()[0];
    let grub_x = h.position(grub).x;
    h.place(second, grub_x, 120.0, Vec2::ZERO);
    h.tick(1);
    assert_eq!(h.game.session().lives, 0);

    h.tick(80);
    assert!(h.game.session().game_over);
    assert!(h.game.session().frame_aborted);

    h.game.restart();
    h.tick(1);
    assert!(!h.game.session().game_over);
    assert_eq!(h.game.session().lives, 2);
    assert!(h.creature(h.player()).is_alive());
}

// ==================== POWER-UP TESTS ====================

#[test]
fn test_star_adds_score_and_disappears() {
    let mut h = Harness::new(&[&floor_map("     o")]);
    let player = h.player();
    let star = h.map().sprites()[0];
    assert_eq!(h.position(star), MapPosition::new(336.0, 224.0));

    h.place(player, 330.0, 114.0, Vec2::ZERO);
    h.tick(1);
    assert_eq!(h.game.session().score, 10);
    assert!(h.map().sprites().is_empty());
    assert!(h.game.world().get_entity(star).is_err());
    assert!(h.heard().contains(&AudioCmd::fx(sounds::PRIZE)));
}

#[test]
fn test_music_toggles_drums() {
    let mut h = Harness::new(&[&floor_map("     !")]);
    let player = h.player();
    h.place(player, 330.0, 114.0, Vec2::ZERO);
    h.tick(1);
    assert!(h.heard().contains(&AudioCmd::ToggleDrums));
    assert!(h.map().sprites().is_empty());
}

#[test]
fn test_goal_advances_to_next_map_and_wraps() {
    let mut h = Harness::new(&[&floor_map("     *"), &floor_map("     *")]);
    let player = h.player();
    h.place(player, 330.0, 114.0, Vec2::ZERO);

    h.tick(1);
    assert!(h.heard().contains(&AudioCmd::fx_with_echo(
        sounds::PRIZE,
        GOAL_ECHO_DELAY_SAMPLES,
        GOAL_ECHO_DECAY
    )));
    h.tick(1);
    assert!(h.game.session().frame_aborted);
    assert_eq!(h.game.world().resource::<LevelSequencer>().current(), 2);
    assert_eq!(h.map().sprites().len(), 1);

    let player = h.player();
    h.place(player, 330.0, 114.0, Vec2::ZERO);
    h.tick(2);
    assert_eq!(h.game.world().resource::<LevelSequencer>().current(), 1);
}

// ==================== PROJECTILE TESTS ====================

#[test]
fn test_throwing_respects_cooldown() {
    let mut h = Harness::new(&[&floor_map("")]);
    let player = h.player();

    h.game.input_mut().attack.tap();
    h.tick(1);
    assert_eq!(h.weapons(), 1);
    let arrow = h.map().sprites()[0];
    let start = h.position(player);
    let thrown = h.position(arrow);
    assert_eq!(thrown.x, start.x + 79.0);
    assert!(h.heard().contains(&AudioCmd::fx(sounds::PLAYER_SHOOT)));

    h.game.input_mut().attack.tap();
    h.tick(1);
    assert_eq!(h.weapons(), 1);

    h.tick(40);
    h.game.input_mut().attack.tap();
    h.tick(1);
    assert_eq!(h.weapons(), 2);
}

#[test]
fn test_throwing_left_after_moving_left() {
    let mut h = Harness::new(&[&floor_map("")]);
    h.game.input_mut().move_left.tap();
    h.tick(1);

    h.game.input_mut().attack.tap();
    h.tick(1);
    let arrow = h.map().sprites()[0];
    let velocity = h.game.world().get::<RigidBody>(arrow).unwrap().velocity;
    assert!(velocity.x < 0.0);
}
