mod clock;
mod config;
mod driver;
mod gateway;
mod runner;
mod terminal;

use clap::Parser;
use common::{log, logger};

use config::get_config_manager;
use gateway::LeaderboardGateway;
use runner::GameRunner;
use terminal::{TerminalDriver, spawn_input_thread};

#[derive(Parser)]
#[command(name = "snake_client")]
struct Args {
    /// Path to the YAML config; defaults to a file beside the executable.
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = get_config_manager(args.config.as_deref()).get_config()?;
    log!("Leaderboard endpoint: {}", config.leaderboard.base_url);

    let (input_tx, input_rx) = tokio::sync::mpsc::unbounded_channel();
    spawn_input_thread(input_tx);

    let driver = TerminalDriver::new(config.game.field_size())?;
    let gateway = LeaderboardGateway::new(&config.leaderboard.base_url);

    GameRunner::new(config.game, driver, gateway, input_rx)
        .run()
        .await;

    Ok(())
}
