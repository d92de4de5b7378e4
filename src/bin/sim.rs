use std::sync::Arc;

use chatship::{
    Dispatcher, GameConfig, InMemoryMessageLog, InMemorySink, InboundMessage, SessionSnapshot,
    SessionState,
};
use serde::Serialize;

/// Scripted setup for one opponent: one rejected carrier, then the full fleet
/// stacked in rows 0..5.
const SCRIPT: [&str; 7] = [
    "/begingame",
    "99",
    "00",
    "10 horizontal",
    "20",
    "30",
    "40",
];

#[derive(Serialize)]
struct Summary {
    opponents: usize,
    started: usize,
    replies: usize,
    logged: usize,
    sessions: Vec<SessionSnapshot>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    chatship::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed> <opponents>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let opponents: usize = args[2].parse()?;

    let sink = InMemorySink::new();
    let message_log = InMemoryMessageLog::new();
    let dispatcher = Arc::new(Dispatcher::with_seed(
        GameConfig::default(),
        Arc::new(sink.clone()),
        Arc::new(message_log.clone()),
        seed,
    )?);

    let mut tasks = Vec::with_capacity(opponents);
    for n in 0..opponents {
        let dispatcher = dispatcher.clone();
        tasks.push(tokio::spawn(async move {
            let opponent = format!("opponent-{}", n);
            for (i, body) in SCRIPT.iter().enumerate() {
                let msg = InboundMessage::new(&opponent, &opponent, format!("{}-{}", n, i), *body);
                dispatcher.handle(&msg).await?;
            }
            Ok::<(), anyhow::Error>(())
        }));
    }
    for task in tasks {
        task.await??;
    }

    let mut sessions = Vec::with_capacity(opponents);
    for opponent in dispatcher.registry().opponents() {
        if let Some(session) = dispatcher.registry().get(&opponent) {
            sessions.push(session.lock().await.snapshot());
        }
    }
    let summary = Summary {
        opponents,
        started: sessions
            .iter()
            .filter(|s| s.state == SessionState::Started)
            .count(),
        replies: sink.len(),
        logged: message_log.len(),
        sessions,
    };

    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
