use std::io;
use std::path::PathBuf;

use clap::Parser;

use clue_cli::config::GameConfig;
use clue_cli::logging::init_logging;
use clue_cli::session::Session;
use clue_core::game::state::Game;

/// Hot-seat Cluedo at the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "clue",
    author,
    version,
    about = "Turn-based Cluedo deduction game for the console"
)]
struct Cli {
    /// Path to an optional YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the number of players.
    #[arg(short, long, value_name = "COUNT")]
    players: Option<usize>,

    /// Override the RNG seed used for the deal and refutations.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no game is played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };

    if let Some(players) = cli.players {
        config.players = players;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    config.validate()?;

    if cli.validate_only {
        println!(
            "Configuration valid: {} players, seed {}.",
            config.players,
            config
                .seed
                .map_or_else(|| "random".to_string(), |seed| seed.to_string())
        );
        return Ok(());
    }

    let _logging_guard = init_logging(&config.logging)?;

    let game = match config.seed {
        Some(seed) => Game::with_seed(config.players, seed)?,
        None => Game::new(config.players)?,
    };
    tracing::info!(
        players = config.players,
        seed = ?game.seed(),
        "starting game"
    );

    let mut session = Session::new(game);
    let stdin = io::stdin();
    let status = session.run(stdin.lock(), io::stdout().lock())?;
    tracing::info!(status = ?status, "session finished");

    Ok(())
}
