//! Command-line entry point for elo-lab
//!
//! Lists the available scenarios, runs rating experiments over them and rates
//! single finish orders by hand.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use elo_lab::config::AppConfig;
use elo_lab::experiment::{load_scenarios, presets, select, ExperimentReport, RatingHistory};
use elo_lab::{ExperimentRunner, Game, GameSettings, Player, RatingEngine, RngSource};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Elo Lab - multi-player Elo ratings under randomized placements
#[derive(Parser)]
#[command(
    name = "elo-lab",
    version,
    about = "Run multi-player Elo rating experiments",
    long_about = "Elo Lab rates 2- and 4-player games by treating each finish order as a set of \
                 pairwise Elo comparisons, and replays randomized games drawn from declared win \
                 ratios to show how ratings evolve."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available scenarios
    List {
        /// Read scenarios from a TOML file instead of the built-in presets
        #[arg(long, value_name = "FILE")]
        scenario_file: Option<PathBuf>,
    },
    /// Run an experiment over one scenario
    Run {
        /// Index of the scenario, as shown by `list`
        #[arg(short, long)]
        scenario: usize,
        /// Read scenarios from a TOML file instead of the built-in presets
        #[arg(long, value_name = "FILE")]
        scenario_file: Option<PathBuf>,
        /// Number of games to play
        #[arg(short, long)]
        games: Option<usize>,
        /// Only the winner beats anyone; the rest tie
        #[arg(long)]
        credit_winner_only: bool,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Write the report and rating history as JSON
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Rate a single finish order
    Rate {
        /// Current ratings, one per seat (e.g. 1500,1500,1500,1500)
        #[arg(long, value_delimiter = ',', required = true)]
        ratings: Vec<i32>,
        /// Player numbers from first to last place (e.g. 2,0,3,1)
        #[arg(long, value_delimiter = ',', required = true)]
        placing: Vec<usize>,
        /// Seats 0 and 2 play against seats 1 and 3
        #[arg(long)]
        team: bool,
        /// Only the winner beats anyone; the rest tie
        #[arg(long)]
        credit_winner_only: bool,
        /// K factor override
        #[arg(short, long)]
        k: Option<f64>,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration from file or environment, then apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    Ok(config)
}

fn scenarios_from(scenario_file: Option<&Path>) -> Result<Vec<elo_lab::ScenarioOption>> {
    match scenario_file {
        Some(path) => {
            info!("Loading scenarios from: {}", path.display());
            load_scenarios(path)
        }
        None => Ok(presets()),
    }
}

fn list(scenario_file: Option<&Path>) -> Result<()> {
    for (index, scenario) in scenarios_from(scenario_file)?.iter().enumerate() {
        println!("{:>3}  {}", index, scenario.describe());
    }
    Ok(())
}

#[derive(Serialize)]
struct RunOutput<'a> {
    report: &'a ExperimentReport,
    history: &'a RatingHistory,
}

fn run(
    config: &mut AppConfig,
    scenario: usize,
    scenario_file: Option<&Path>,
    games: Option<usize>,
    credit_winner_only: bool,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<()> {
    if let Some(games) = games {
        config.experiment.n_games = games;
    }
    if credit_winner_only {
        config.experiment.credit_winner_only = true;
    }
    if seed.is_some() {
        config.experiment.seed = seed;
    }

    let scenarios = scenarios_from(scenario_file)?;
    let option = select(&scenarios, scenario)?;
    let credit_winner_only = config.experiment.credit_winner_only;
    info!(scenario, "{}", option.describe());

    let runner = ExperimentRunner::from_config(config);
    let outcome = match config.experiment.seed {
        Some(seed) => runner.run(option, credit_winner_only, &mut RngSource::seeded(seed))?,
        None => runner.run(option, credit_winner_only, &mut RngSource::from_entropy())?,
    };

    let report = ExperimentReport::new(option, credit_winner_only, runner.n_games(), &outcome);
    print!("{}", report.render_table());

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&RunOutput {
            report: &report,
            history: &outcome.history,
        })?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote results to {}", path.display());
    }

    Ok(())
}

fn rate(
    config: &AppConfig,
    ratings: &[i32],
    placing: &[usize],
    settings: GameSettings,
    k: Option<f64>,
) -> Result<()> {
    let engine = match k {
        Some(k) => RatingEngine::new(k)?,
        None => config.rating.engine()?,
    };

    let mut game = Game::with_engine(settings, engine);
    for (seat, &rating) in ratings.iter().enumerate() {
        game.add_player(Player::new(seat, 0.0, rating))?;
    }
    let new_ratings = game.rate_round(placing)?;

    println!("scoring {}, K {}", settings.scoring_mode(), engine.k_factor());
    for (player, new_rating) in game.players().iter().zip(&new_ratings) {
        println!(
            "{:<10} {:>6} -> {:>6} ({:+})",
            player.name,
            player.elo_rating,
            new_rating,
            new_rating - player.elo_rating
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    match args.command {
        Command::List { scenario_file } => list(scenario_file.as_deref()),
        Command::Run {
            scenario,
            scenario_file,
            games,
            credit_winner_only,
            seed,
            output,
        } => run(
            &mut config,
            scenario,
            scenario_file.as_deref(),
            games,
            credit_winner_only,
            seed,
            output.as_deref(),
        ),
        Command::Rate {
            ratings,
            placing,
            team,
            credit_winner_only,
            k,
        } => {
            let settings = GameSettings {
                credit_winner_only,
                team,
                shuffle_players: false,
            };
            rate(&config, &ratings, &placing, settings, k)
        }
    }
}
