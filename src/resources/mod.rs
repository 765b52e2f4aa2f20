//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world: the
//! current level, the asset catalog, configuration, timing, input and the
//! game session.
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `catalog` – tile images and the host sprites map characters place
//! - `gameconfig` – tunables loaded from `config.ini`
//! - `images` – image handles and the provider trait for decoded images
//! - `input` – logical game actions fed by the host
//! - `levelrequest` – pending level change applied at the next frame
//! - `levels` – map file parser and the level sequence
//! - `session` – lives, score, pause and attack state of the running game
//! - `spawnqueue` – sprites created mid-frame, added after the sweep
//! - `tilemap` – the tile grid and the level's sprite list
//! - `viewport` – screen size and camera placement
//! - `worldtime` – simulation time and delta
pub mod audio;
pub mod catalog;
pub mod gameconfig;
pub mod images;
pub mod input;
pub mod levelrequest;
pub mod levels;
pub mod session;
pub mod spawnqueue;
pub mod tilemap;
pub mod viewport;
pub mod worldtime;
