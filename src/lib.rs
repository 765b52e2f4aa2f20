//! tilequest library.
//!
//! A tile-based platformer simulation built on `bevy_ecs`. This module
//! exposes the components, resources, systems and messages so the runner
//! binary and the integration tests can assemble the same world.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
