//! Engine systems.
//!
//! This module groups the ECS systems run by the frame schedule, in roughly
//! the order they run.
//!
//! Submodules overview
//! - [`time`] – advance the simulation clock
//! - [`audio`] – bridge with the audio thread (forward commands, poll replies)
//! - [`level`] – load maps, apply level requests, react to the player's death
//! - [`input`] – turn game actions into player velocity, jumps and throws
//! - [`collision`] – tile probes and sprite overlap tests
//! - [`movement`] – gravity and per-axis moves against the tile grid
//! - [`player`] – player movement and contact with other sprites
//! - [`scene`] – the sweep over the level's sprite list
//! - [`spawn`] – build entities from catalog hosts
//! - [`stuckto`] – move riders with the sprite they ride
//! - [`camera`] – wake creatures once the camera shows them

pub mod audio;
pub mod camera;
pub mod collision;
pub mod input;
pub mod level;
pub mod movement;
pub mod player;
pub mod scene;
pub mod spawn;
pub mod stuckto;
pub mod time;
