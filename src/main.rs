//! ggo-rust: a Go rules engine.
//!
//! ## Usage
//!
//! - `ggo-rust` - Play a random demo game
//! - `ggo-rust gtp` - Start GTP server for GUI integration
//! - `ggo-rust demo` - Play a random demo game

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ggo_rust::constants::{DEFAULT_BOARD_SIZE, DEFAULT_DEMO_MOVES, MAX_BOARD_SIZE};
use ggo_rust::gtp::GtpEngine;
use ggo_rust::playout::random_game;

/// ggo-rust: a Go rules engine
#[derive(Parser)]
#[command(name = "ggo-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log engine events to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server on stdin/stdout
    Gtp {
        /// Board size
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE, value_parser = parse_size)]
        size: usize,
    },
    /// Play a random game and print the result
    Demo {
        /// Board size
        #[arg(long, default_value_t = 9, value_parser = parse_size)]
        size: usize,
        /// Maximum number of moves
        #[arg(long, default_value_t = DEFAULT_DEMO_MOVES)]
        moves: usize,
        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn parse_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|_| format!("`{s}` is not a board size"))?;
    if !(1..=MAX_BOARD_SIZE).contains(&size) {
        return Err(format!("board size must be between 1 and {MAX_BOARD_SIZE}"));
    }
    Ok(size)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Gtp { size }) => {
            let mut engine = GtpEngine::new(size)?;
            engine.run()
        }
        Some(Commands::Demo { size, moves, seed }) => run_demo(size, moves, seed),
        None => run_demo(9, DEFAULT_DEMO_MOVES, None),
    }
}

fn run_demo(size: usize, moves: usize, seed: Option<u64>) -> anyhow::Result<()> {
    let seed = seed.unwrap_or_else(|| fastrand::u64(..));
    println!("ggo-rust: random game on {size}x{size}, seed {seed}\n");

    let game = random_game(size, moves, seed)?;
    println!("{}", game.board());
    println!(
        "move {}, {} to play, {} forbidden point(s)",
        game.move_number(),
        game.move_color(),
        game.illegal_points().len()
    );

    let state = serde_json::to_string_pretty(&game.state()).context("failed to encode state")?;
    println!("{state}");
    Ok(())
}
