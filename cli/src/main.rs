use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use woodblock_core::{GameSnapshot, GameState, initialize};

mod autoplay;
mod config;
mod render;
mod replay;

#[derive(Parser, Debug)]
#[command(version, about = "Headless driver for the wood block puzzle engine", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// TOML file overriding the default rules
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a freshly started game as a JSON snapshot
    New,
    /// Play games with a greedy policy and report the scores
    Autoplay {
        /// Number of games to play
        #[arg(short, long, default_value_t = 1)]
        games: u32,

        /// Stop a game after this many placements
        #[arg(long, default_value_t = 10_000)]
        max_moves: u32,

        /// Draw the final board of every game
        #[arg(long)]
        show: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply a JSON list of actions to a new game and print the final snapshot
    Replay {
        /// File with a JSON array of actions
        script: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {seed}");

    let config = match &args.config {
        Some(path) => config::load(path)?,
        None => Default::default(),
    };
    log::debug!("rules: {config:?}");

    let mut rng = SmallRng::seed_from_u64(seed);

    match args.command {
        Command::New => {
            let state = initialize(config, &mut rng);
            print_snapshot(&state)?;
        }
        Command::Autoplay {
            games,
            max_moves,
            show,
            json,
        } => {
            let summary = autoplay::run(config, &mut rng, games, max_moves);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                summary.print(show);
            }
        }
        Command::Replay { script } => {
            let actions = replay::load_script(&script)?;
            let state = replay::run(initialize(config, &mut rng), &actions, &mut rng);
            print_snapshot(&state)?;
        }
    }

    Ok(())
}

fn print_snapshot(state: &GameState) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&GameSnapshot::from_state(state))?
    );
    Ok(())
}
