use std::io::{stdin, stdout};
use std::path::PathBuf;

use anyhow::Context;
use assistant::{load_game_config, run_session, simulate_game, Recorder, Session};
use clap::{Parser, Subcommand};
use hanabi_helper::{ColorRule, GameConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info", global = true)]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Command {
    /// Serve a UI over stdin/stdout, one JSON request and response per line
    Session {
        /// Start with a game from this config JSON file instead of waiting for new_game
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Record the session's requests and responses as JSON into this directory
        #[arg(short, long)]
        record_to_directory: Option<PathBuf>,
    },
    /// Play random games with truthful hints and check every deduction against the real cards
    Simulate {
        /// How many games to play
        #[arg(short = 'n', long = "games", default_value_t = 100)]
        num_games: usize,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Path to a config JSON file, overrides --players and --color-rule
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, default_value_t = 2)]
        players: u8,

        /// "standard" or "rainbow"
        #[arg(long, default_value = "standard")]
        color_rule: ColorRule,

        /// Give up on a game after this many actions
        #[arg(long, default_value_t = 1000)]
        max_actions: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    match args.command {
        Command::Session {
            config,
            record_to_directory,
        } => {
            let mut session = match config {
                Some(path) => Session::with_game(load_game_config(&path)?),
                None => Session::new(),
            };
            let mut recorder = if let Some(dir_path) = record_to_directory {
                Some(Recorder::new(dir_path)?)
            } else {
                None
            };
            run_session(&mut session, stdin().lock(), stdout().lock(), &mut recorder)
        }
        Command::Simulate {
            num_games,
            seed,
            config,
            players,
            color_rule,
            max_actions,
        } => {
            let config = match config {
                Some(path) => load_game_config(&path)?,
                None => GameConfig::new(players, color_rule)?,
            };

            // Get a random seed
            let seed = seed.unwrap_or_else(rand::random);
            info!(seed);
            let mut rng = StdRng::seed_from_u64(seed);

            let mut total_actions = 0;
            let mut total_resolved = 0;
            for game_idx in 0..num_games {
                let report = simulate_game(config, &mut rng, max_actions)
                    .with_context(|| format!("Game {} of seed {} went wrong", game_idx, seed))?;
                debug!(game_idx, ?report);
                total_actions += report.actions;
                total_resolved += report.resolved_at_end;
            }
            eprintln!(
                "{} games with {} players ({:?}) stayed consistent:",
                num_games,
                config.player_count(),
                config.color_rule()
            );
            eprintln!(
                "- {} actions\n- {} tiles resolved at the end",
                total_actions, total_resolved
            );
            Ok(())
        }
    }
}

fn initialize_logging(level: LevelFilter) {
    // stdout carries the protocol, so logs go to stderr.
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
