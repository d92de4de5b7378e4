use std::sync::Arc;

use chatship::{
    init_logging, ConsoleFeed, ConsoleSink, Dispatcher, GameConfig, InMemoryMessageLog,
    BOARD_SIZE,
};
use clap::Parser;

/// Play chat battleship setup from the terminal. Each input line is
/// `<opponent> <message>`, e.g. `alice /begingame` then `alice 00 vertical`.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value_t = BOARD_SIZE, help = "Width and height of each board")]
    board_size: usize,
    #[arg(long, help = "Fix RNG seed for reproducible computer fleets (e.g., --seed 12345)")]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = GameConfig::with_board_size(cli.board_size);
    let sink = Arc::new(ConsoleSink::new());
    let message_log = Arc::new(InMemoryMessageLog::new());
    let dispatcher = match cli.seed {
        Some(seed) => {
            log::info!("Using fixed seed: {} (computer fleets will be reproducible)", seed);
            Dispatcher::with_seed(config, sink, message_log.clone(), seed)?
        }
        None => Dispatcher::new(config, sink, message_log.clone())?,
    };

    let mut feed = ConsoleFeed::new();
    let handled = dispatcher.run(&mut feed).await?;
    log::info!(
        "input closed after {} message(s), {} logged, {} session(s) open",
        handled,
        message_log.len(),
        dispatcher.registry().len()
    );
    Ok(())
}
