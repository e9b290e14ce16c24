//! Mech Arena entry point
//!
//! Runs a headless match: two seeded mechanisms drive toward each other
//! under scripted input until they collide or the script runs out.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use mech_arena::Settings;
use mech_arena::platform::{FrameClock, Key, NoWait, ScriptedInput, SleepClock};
use mech_arena::renderer::{Marker, RecordingSurface};
use mech_arena::sim::{Game, MechanismId, grow_layout};

#[derive(Parser, Debug)]
#[command(name = "mech-arena", about = "Headless two-player mechanism arena")]
struct Args {
    /// Settings file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scripted ticks before quitting
    #[arg(short, long, default_value_t = 180)]
    ticks: usize,

    /// Layout seed
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Blocks per mechanism
    #[arg(short, long, default_value_t = 5)]
    blocks: usize,

    /// Pace ticks to wall-clock time
    #[arg(long)]
    realtime: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> mech_arena::Result<()> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    log::info!("Mech Arena (headless) starting with seed {}", args.seed);

    let mut game = Game::new(RecordingSurface::new(), settings)?;

    let spacing = game.settings().block_radius * 2.0;
    let left = grow_layout(args.seed, args.blocks, spacing);
    let right = grow_layout(args.seed.wrapping_add(1), args.blocks, spacing);
    let player1 = game.build_mechanism(MechanismId(1), Vec2::new(-6.0, 0.0), &left)?;
    let player2 = game.build_mechanism(MechanismId(2), Vec2::new(6.0, 0.0), &right)?;
    game.add_players(player1, player2)?;

    game.add_object(Box::new(Marker::new(Vec2::new(-6.0, 0.0), 0.1)))?;
    game.add_object(Box::new(Marker::new(Vec2::new(6.0, 0.0), 0.1)))?;

    // Player 1 pushes right, player 2 pushes left
    let mut input = ScriptedInput::hold(&[Key::D, Key::Left], args.ticks);
    let mut clock: Box<dyn FrameClock> = if args.realtime {
        Box::new(SleepClock::new())
    } else {
        Box::new(NoWait)
    };

    let ticks = game.run(&mut input, clock.as_mut())?;

    let stats = game.director_stats();
    log::info!(
        "Finished after {} ticks: {} pair checks, {} narrow, {} hits",
        ticks,
        stats.checks,
        stats.narrow_checks,
        stats.hits
    );
    for player in game.players() {
        log::info!(
            "{:?}: center of mass {}, {} blocks",
            player.id(),
            player.get_center_of_mass(),
            player.get_blocks().len()
        );
    }
    Ok(())
}
