mod broadcaster;
mod commands;
mod config;

use std::path::PathBuf;

use clap::Parser;
use snake_common::games::GameBroadcaster;
use snake_common::snake::{SnakeEngine, SnakeSession};
use snake_common::{log, logger};
use tokio::io::{AsyncBufReadExt, BufReader};

use broadcaster::ConsoleBroadcaster;
use commands::{ConsoleCommand, HELP};
use config::get_config_manager;

#[derive(Parser)]
#[command(name = "snake_runner")]
#[command(version, about = "Drives the snake engine from text commands on stdin")]
struct Args {
    /// YAML config file; defaults to snake_runner_config.yaml next to the binary
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement, overrides the config
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty level to select before the first start
    #[arg(long)]
    difficulty: Option<usize>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let (config_manager, config_path) = get_config_manager(args.config);
    let mut config = config_manager.get_config()?;
    log!("Using config {}", config_path.display());

    if let Some(seed) = args.seed {
        config.snake.seed = Some(seed);
    }

    let engine = SnakeEngine::new(config.snake)?;
    let mut session = SnakeSession::new(engine, ConsoleBroadcaster::new());

    if let Some(level) = args.difficulty {
        session.set_difficulty(level).await;
    }

    log!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<ConsoleCommand>() {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(command) => handle_command(&mut session, command).await,
                    Err(e) => log!("{}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log!("Interrupted, shutting down");
                break;
            }
        }
    }

    session.stop().await;
    Ok(())
}

async fn handle_command<B: GameBroadcaster>(session: &mut SnakeSession<B>, command: ConsoleCommand) {
    match command {
        ConsoleCommand::Start => {
            session.start().await;
        }
        ConsoleCommand::Stop => {
            session.stop().await;
        }
        ConsoleCommand::Resume => {
            session.resume().await;
        }
        ConsoleCommand::Restart => {
            session.restart().await;
        }
        ConsoleCommand::Step => {
            if session.step().await.is_none() {
                log!("Step ignored while {}", session.status().await);
            }
        }
        ConsoleCommand::Turn(direction) => {
            let heading = session.set_direction(direction).await;
            if heading != direction {
                log!("Turn {} ignored, heading {}", direction, heading);
            }
        }
        ConsoleCommand::Difficulty(level) => {
            let selected = session.set_difficulty(level).await;
            if selected != level {
                log!("Difficulty {} ignored, staying at {}", level, selected);
            }
        }
        ConsoleCommand::Status => {
            let snapshot = session.snapshot().await;
            let head = snapshot
                .body
                .first()
                .map(ToString::to_string)
                .unwrap_or_default();
            log!(
                "status {} | tick {} | score {} | head {} | length {} | difficulty {} ({:?}/tick)",
                snapshot.status,
                snapshot.tick,
                snapshot.score,
                head,
                snapshot.body.len(),
                snapshot.difficulty,
                snapshot.tick_interval
            );
        }
        ConsoleCommand::Help => log!("{}", HELP),
        ConsoleCommand::Quit => {}
    }
}
