//! tilequest headless runner.
//!
//! Loads `config.ini`, the resource catalog and the first map, then advances
//! the simulation a fixed number of frames at a fixed step. There is no
//! window: the run is driven by the command line (hold a direction, jump and
//! throw on a period) and reported through the log.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --frames 600 --hold right --jump-every 45
//! ```

mod components;
mod error;
mod events;
mod game;
mod resources;
mod systems;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::game::Game;
use crate::resources::audio::LogAudioBackend;
use crate::resources::catalog::ResourceCatalog;
use crate::resources::gameconfig::GameConfig;
use crate::resources::images::ImageStore;
use crate::resources::tilemap::TileMap;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Direction {
    Left,
    Right,
}

/// tilequest headless platformer simulation
#[derive(Parser)]
#[command(version, about = "Runs the tilequest simulation without a window.")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Milliseconds per frame.
    #[arg(long, default_value_t = 16)]
    step_ms: u64,

    /// Start on this map instead of the first one.
    #[arg(long)]
    map: Option<u32>,

    /// Keep a direction pressed for the whole run.
    #[arg(long, value_enum)]
    hold: Option<Direction>,

    /// Press jump for this many frames out of every period.
    #[arg(long, value_name = "FRAMES")]
    jump_every: Option<u64>,

    /// Throw a projectile every this many frames.
    #[arg(long, value_name = "FRAMES")]
    throw_every: Option<u64>,

    /// Write the effective configuration back to the config file and exit.
    #[arg(long)]
    save_config: bool,
}

/// Frames the jump key stays down in each jump period.
const JUMP_HOLD_FRAMES: u64 = 20;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("Using default configuration: {}", e);
    }

    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Configuration written to {}", config.config_path.display());
        return;
    }

    let mut images = ImageStore::new();
    let catalog = match ResourceCatalog::load(&config.catalog_path, &mut images) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error loading catalog: {e}");
            std::process::exit(1);
        }
    };

    log::info!("Hello, world! This is tilequest!");
    let mut game =
        Game::new(config, catalog, images).with_audio(Box::new(LogAudioBackend::default()));
    if let Err(e) = game.start(cli.map) {
        eprintln!("Error loading map: {e}");
        game.shutdown();
        std::process::exit(1);
    }

    // --------------- Main loop ---------------
    for frame in 0..cli.frames {
        if game.should_quit() {
            break;
        }
        drive_input(&cli, &mut game, frame);
        game.tick(cli.step_ms);
        if game.session().game_over {
            log::info!("Game over after {} frames", frame + 1);
            break;
        }
    }

    let session = game.session();
    let map = game.world().resource::<TileMap>();
    log::info!(
        "Finished: score {}, lives {}, {} sprites left on the map",
        session.score,
        session.lives,
        map.sprites().len()
    );
    game.shutdown();
}

fn drive_input(cli: &Cli, game: &mut Game, frame: u64) {
    let mut input = game.input_mut();
    match cli.hold {
        Some(Direction::Left) => input.move_left.press(1),
        Some(Direction::Right) => input.move_right.press(1),
        None => {}
    }
    if let Some(period) = cli.jump_every.filter(|p| *p > 0) {
        if frame % period < JUMP_HOLD_FRAMES.min(period) {
            input.jump.press(1);
        } else {
            input.jump.release();
        }
    }
    if let Some(period) = cli.throw_every.filter(|p| *p > 0) {
        if frame % period == 0 {
            input.attack.tap();
        }
    }
}
