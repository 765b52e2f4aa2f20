//! Living sprites: players, enemies and projectiles.
//!
//! A [`Creature`] carries health, a three-state life cycle and the six
//! directional animations it picks from every frame. Behaviour that differs
//! between kinds (speed, flight, how a wall hit is answered, whether it
//! wakes when it comes into view) lives in a [`CreatureTraits`] record chosen
//! from the [`CreatureKind`], so the scene systems treat every creature the
//! same way.
//!
//! # Life cycle
//!
//! `Normal -> Dying -> Dead`, forward only. Entering `Dying` zeroes the
//! velocity; after `die_time` milliseconds in `Dying` the creature becomes
//! `Dead` and the scene removes it. [`Creature::reset`] is the only way back.

use bevy_ecs::prelude::Component;
use serde::Deserialize;

use crate::components::animation::Animation;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;

/// Milliseconds a creature spends in [`CreatureState::Dying`].
pub const DEFAULT_DIE_TIME_MS: u64 = 1000;
/// Starting health when the host does not say otherwise.
pub const DEFAULT_HEALTH: i32 = 2;

/// Ordered by life-cycle progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum CreatureState {
    #[default]
    Normal,
    Dying,
    Dead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureKind {
    Player,
    Grub,
    Fly,
    Archer,
    Boss,
    Weapon,
}

/// Answer to running into a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalResponse {
    /// Reverse horizontal velocity (patrolling).
    Bounce,
    /// Zero horizontal velocity.
    Stop,
}

/// Answer to landing on or bumping into a tile vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalResponse {
    Stop,
    Reverse,
}

/// Per-kind behaviour record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CreatureTraits {
    /// Pixels per millisecond.
    pub max_speed: f32,
    /// Ignores gravity while alive.
    pub flies: bool,
    pub on_horizontal: HorizontalResponse,
    pub on_vertical: VerticalResponse,
    /// Starts moving the first time it is seen.
    pub wakes_up: bool,
}

impl CreatureKind {
    pub fn traits(self) -> CreatureTraits {
        let walker = |max_speed| CreatureTraits {
            max_speed,
            flies: false,
            on_horizontal: HorizontalResponse::Bounce,
            on_vertical: VerticalResponse::Stop,
            wakes_up: true,
        };
        match self {
            CreatureKind::Player => CreatureTraits {
                on_horizontal: HorizontalResponse::Stop,
                wakes_up: false,
                ..walker(0.5)
            },
            CreatureKind::Grub => walker(0.05),
            CreatureKind::Archer => walker(0.05),
            CreatureKind::Boss => walker(0.5),
            CreatureKind::Fly => CreatureTraits {
                flies: true,
                on_vertical: VerticalResponse::Reverse,
                ..walker(0.2)
            },
            CreatureKind::Weapon => CreatureTraits {
                on_horizontal: HorizontalResponse::Stop,
                wakes_up: false,
                ..walker(0.95)
            },
        }
    }
}

/// Which of the six animations is playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimSlot {
    WalkLeft,
    WalkRight,
    DeadLeft,
    DeadRight,
    IdleLeft,
    IdleRight,
}

impl AnimSlot {
    pub fn faces_right(self) -> bool {
        matches!(
            self,
            AnimSlot::WalkRight | AnimSlot::DeadRight | AnimSlot::IdleRight
        )
    }
}

/// The six directional animations of a creature.
#[derive(Clone, Debug, Default)]
pub struct CreatureAnimations {
    pub walk_left: Animation,
    pub walk_right: Animation,
    pub dead_left: Animation,
    pub dead_right: Animation,
    pub idle_left: Animation,
    pub idle_right: Animation,
}

impl CreatureAnimations {
    /// Animation set whose idle animations reuse the walk cycle.
    pub fn walking(
        walk_left: Animation,
        walk_right: Animation,
        dead_left: Animation,
        dead_right: Animation,
    ) -> Self {
        Self {
            idle_left: walk_left.clone(),
            idle_right: walk_right.clone(),
            walk_left,
            walk_right,
            dead_left,
            dead_right,
        }
    }

    pub fn get(&self, slot: AnimSlot) -> &Animation {
        match slot {
            AnimSlot::WalkLeft => &self.walk_left,
            AnimSlot::WalkRight => &self.walk_right,
            AnimSlot::DeadLeft => &self.dead_left,
            AnimSlot::DeadRight => &self.dead_right,
            AnimSlot::IdleLeft => &self.idle_left,
            AnimSlot::IdleRight => &self.idle_right,
        }
    }
}

#[derive(Component, Clone, Debug)]
pub struct Creature {
    kind: CreatureKind,
    traits: CreatureTraits,
    health: i32,
    state: CreatureState,
    state_time: u64,
    die_time: u64,
    animations: CreatureAnimations,
    current: AnimSlot,
    last_attack_ms: Option<u64>,
}

impl Creature {
    /// Creature facing right with the kind's default traits.
    pub fn new(kind: CreatureKind, animations: CreatureAnimations) -> Self {
        Self {
            kind,
            traits: kind.traits(),
            health: DEFAULT_HEALTH,
            state: CreatureState::Normal,
            state_time: 0,
            die_time: DEFAULT_DIE_TIME_MS,
            animations,
            current: AnimSlot::WalkRight,
            last_attack_ms: None,
        }
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    pub fn with_die_time(mut self, die_time_ms: u64) -> Self {
        self.die_time = die_time_ms;
        self
    }

    pub fn with_traits(mut self, traits: CreatureTraits) -> Self {
        self.traits = traits;
        self
    }

    /// Sprite showing this creature's starting animation.
    pub fn initial_sprite(&self) -> Sprite {
        Sprite::new(self.animations.get(self.current).clone())
    }

    pub fn kind(&self) -> CreatureKind {
        self.kind
    }

    pub fn traits(&self) -> &CreatureTraits {
        &self.traits
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn set_health(&mut self, health: i32) {
        self.health = health;
    }

    /// Subtract `amount` and return the remaining health.
    pub fn damage(&mut self, amount: i32) -> i32 {
        self.health -= amount;
        self.health
    }

    pub fn state(&self) -> CreatureState {
        self.state
    }

    /// Milliseconds since the current state was entered.
    pub fn state_time(&self) -> u64 {
        self.state_time
    }

    pub fn current_slot(&self) -> AnimSlot {
        self.current
    }

    pub fn facing_right(&self) -> bool {
        self.current.faces_right()
    }

    pub fn max_speed(&self) -> f32 {
        self.traits.max_speed
    }

    pub fn is_alive(&self) -> bool {
        self.state == CreatureState::Normal
    }

    pub fn is_flying(&self) -> bool {
        self.traits.flies && self.is_alive()
    }

    pub fn last_attack_ms(&self) -> Option<u64> {
        self.last_attack_ms
    }

    pub fn mark_attack(&mut self, now_ms: u64) {
        self.last_attack_ms = Some(now_ms);
    }

    /// Move forward in the life cycle.
    ///
    /// Setting the current state again is a no-op and keeps the timer.
    /// Backward transitions are ignored; use [`Creature::reset`].
    pub fn set_state(&mut self, state: CreatureState, body: &mut RigidBody) {
        if self.state == state || state < self.state {
            return;
        }
        self.state = state;
        self.state_time = 0;
        if state == CreatureState::Dying {
            body.stop();
        }
    }

    /// Bring the creature back to `Normal` with the given health.
    pub fn reset(&mut self, health: i32) {
        self.state = CreatureState::Normal;
        self.state_time = 0;
        self.health = health;
    }

    /// Start moving the first time the creature is seen.
    pub fn wake_up(&self, body: &mut RigidBody) {
        if self.traits.wakes_up && self.is_alive() && body.velocity.x == 0.0 {
            body.velocity.x = -self.traits.max_speed;
        }
    }

    pub fn collide_horizontal(&self, body: &mut RigidBody) {
        match self.traits.on_horizontal {
            HorizontalResponse::Bounce => body.velocity.x = -body.velocity.x,
            HorizontalResponse::Stop => body.velocity.x = 0.0,
        }
    }

    pub fn collide_vertical(&self, body: &mut RigidBody) {
        match self.traits.on_vertical {
            VerticalResponse::Stop => body.velocity.y = 0.0,
            VerticalResponse::Reverse => body.velocity.y = -body.velocity.y,
        }
    }

    fn select_slot(&self, body: &RigidBody) -> AnimSlot {
        if self.state == CreatureState::Dead {
            return self.current;
        }
        // standing still only changes a walk into an idle
        let slot = if body.velocity.x < 0.0 {
            AnimSlot::WalkLeft
        } else if body.velocity.x > 0.0 {
            AnimSlot::WalkRight
        } else {
            match self.current {
                AnimSlot::WalkLeft => AnimSlot::IdleLeft,
                AnimSlot::WalkRight => AnimSlot::IdleRight,
                other => other,
            }
        };
        if self.state != CreatureState::Dying {
            return slot;
        }
        // entering Dying stops the body, so the walk has already turned idle
        match slot {
            AnimSlot::WalkLeft | AnimSlot::IdleLeft => AnimSlot::DeadLeft,
            AnimSlot::WalkRight | AnimSlot::IdleRight => AnimSlot::DeadRight,
            dead => dead,
        }
    }

    /// Per-frame animation choice and life-cycle timer.
    ///
    /// Switching animations restarts the new one; keeping the same one
    /// advances it by `elapsed_ms`.
    pub fn update(&mut self, elapsed_ms: u64, body: &mut RigidBody, sprite: &mut Sprite) {
        let slot = self.select_slot(body);
        if slot != self.current {
            self.current = slot;
            sprite.animation = self.animations.get(slot).clone();
            sprite.animation.start();
        } else {
            sprite.animation.update(elapsed_ms);
        }

        self.state_time += elapsed_ms;
        if self.state == CreatureState::Dying && self.state_time >= self.die_time {
            self.set_state(CreatureState::Dead, body);
        }
    }
}
