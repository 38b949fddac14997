mod cli_config;
mod input;
mod terminal_game;

use std::path::PathBuf;

use clap::Parser;
use tictactoe_engine::config::{ConfigManager, Validate};
use tictactoe_engine::games::SessionRng;
use tictactoe_engine::games::tictactoe::PlayStyle;
use tictactoe_engine::{log, logger};

use cli_config::{CliConfigManager, GameMode, MarkChoice, get_config_manager};
use input::Console;

#[derive(Parser)]
#[command(name = "tictactoe_cli", about = "Play tic-tac-toe against a minimax engine")]
struct Args {
    /// Config file to use instead of the one next to the executable
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    mode: Option<GameMode>,
    /// Mark for the human player in singleplayer mode
    #[arg(long, value_enum)]
    mark: Option<MarkChoice>,
    /// Use the legacy move selection of the first bot release
    #[arg(long)]
    legacy: bool,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    use_log_prefix: bool,
    /// Write the effective settings back to the config file
    #[arg(long)]
    save_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager: CliConfigManager = match &args.config {
        Some(path) => ConfigManager::from_yaml_file(path.clone()),
        None => get_config_manager(),
    };

    let mut config = config_manager.get_config()?;
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(mark) = args.mark {
        config.mark = mark;
    }
    if args.legacy {
        config.play_style = PlayStyle::LegacyGreedy;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.use_log_prefix |= args.use_log_prefix;
    config.validate()?;

    if args.save_config {
        config_manager.set_config(&config)?;
    }

    let prefix = if config.use_log_prefix {
        Some("TicTacToe".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let mut rng = config.seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random);
    log!("Starting {:?} mode with seed {}", config.mode, rng.seed());

    let mut console = Console::new();
    loop {
        let outcome = terminal_game::run_game(&config, &mut rng, &mut console).await?;
        if outcome.is_none() || config.mode == GameMode::Watch {
            break;
        }
        if !console.ask_yes_no("Do you want to start a new game? (yes/no)").await? {
            println!("Okay, no new game for now.");
            break;
        }
        println!("Starting a new game...");
    }

    log!("Exiting");
    Ok(())
}
