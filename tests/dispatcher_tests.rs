use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chatship::{
    Dispatcher, GameConfig, InMemoryFeed, InMemoryMessageLog, InMemorySink, InboundMessage,
    MessageLog, MessageSink, SessionState, ShipClass,
};

fn dispatcher(seed: u64) -> (Dispatcher, InMemorySink, InMemoryMessageLog) {
    let sink = InMemorySink::new();
    let message_log = InMemoryMessageLog::new();
    let dispatcher = Dispatcher::with_seed(
        GameConfig::default(),
        Arc::new(sink.clone()),
        Arc::new(message_log.clone()),
        seed,
    )
    .unwrap();
    (dispatcher, sink, message_log)
}

fn msg(opponent: &str, id: usize, body: &str) -> InboundMessage {
    InboundMessage::new(opponent, format!("thread-{}", opponent), id.to_string(), body)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_full_setup_over_chat() -> anyhow::Result<()> {
    let (dispatcher, sink, message_log) = dispatcher(1);
    let script = ["/begingame", "00", "10", "20", "30", "40"];
    for (i, body) in script.iter().enumerate() {
        dispatcher.handle(&msg("alice", i, body)).await?;
    }

    assert_eq!(
        sink.bodies_for("thread-alice"),
        vec![
            "Please place your carrier.",
            "Please place your battleship.",
            "Please place your cruiser.",
            "Please place your submarine.",
            "Please place your destroyer.",
            "You go first!",
        ]
    );
    assert_eq!(message_log.len(), script.len());
    assert_eq!(message_log.entries()[0].body, "/begingame");

    let session = dispatcher.registry().get("alice").unwrap();
    let session = session.lock().await;
    assert_eq!(session.state(), SessionState::Started);
    assert_eq!(session.computer_board().occupied_cells(), 17);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_placement_yields_one_reply() -> anyhow::Result<()> {
    let (dispatcher, sink, _) = dispatcher(2);
    dispatcher.handle(&msg("alice", 0, "/begingame")).await?;
    sink.take();

    dispatcher.handle(&msg("alice", 1, "99")).await?;
    dispatcher.handle(&msg("alice", 2, "zz top")).await?;
    assert_eq!(
        sink.bodies_for("thread-alice"),
        vec![
            "Invalid coordinates, please place your carrier.",
            "Invalid coordinates, please place your carrier.",
        ]
    );
    let session = dispatcher.registry().get("alice").unwrap();
    assert_eq!(
        session.lock().await.state(),
        SessionState::Awaiting(ShipClass::Carrier)
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_opponent_gets_notice() -> anyhow::Result<()> {
    let (dispatcher, sink, message_log) = dispatcher(3);
    dispatcher.handle(&msg("mallory", 0, "00")).await?;
    dispatcher.handle(&msg("mallory", 1, "/endgame")).await?;
    assert_eq!(
        sink.bodies_for("thread-mallory"),
        vec![
            "No game in progress. Send /begingame to start one.",
            "No game in progress. Send /begingame to start one.",
        ]
    );
    assert!(dispatcher.registry().is_empty());
    assert_eq!(message_log.len(), 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_begin_twice_keeps_existing_session() -> anyhow::Result<()> {
    let (dispatcher, sink, _) = dispatcher(4);
    dispatcher.handle(&msg("alice", 0, "/begingame")).await?;
    dispatcher.handle(&msg("alice", 1, "00")).await?;
    dispatcher.handle(&msg("alice", 2, "/BEGINGAME")).await?;

    let replies = sink.bodies_for("thread-alice");
    assert_eq!(replies.last().unwrap(), "A game is already in progress.");
    let session = dispatcher.registry().get("alice").unwrap();
    assert_eq!(
        session.lock().await.state(),
        SessionState::Awaiting(ShipClass::Battleship)
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_help_and_endgame() -> anyhow::Result<()> {
    let (dispatcher, sink, _) = dispatcher(5);
    dispatcher.handle(&msg("alice", 0, "/help")).await?;
    dispatcher.handle(&msg("alice", 1, "/begingame")).await?;
    dispatcher.handle(&msg("alice", 2, "/endgame")).await?;
    dispatcher.handle(&msg("alice", 3, "/begingame")).await?;

    assert_eq!(
        sink.bodies_for("thread-alice"),
        vec![
            "The command \"/begingame\" will start your battleship game!",
            "Please place your carrier.",
            "Game ended.",
            "Please place your carrier.",
        ]
    );
    assert_eq!(dispatcher.registry().len(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_post_setup_text_is_answered_once() -> anyhow::Result<()> {
    let (dispatcher, sink, _) = dispatcher(6);
    for (i, body) in ["/begingame", "00", "10", "20", "30", "40", "55"]
        .iter()
        .enumerate()
    {
        dispatcher.handle(&msg("alice", i, body)).await?;
    }
    let replies = sink.bodies_for("thread-alice");
    assert_eq!(replies.len(), 7);
    assert_eq!(replies[6], "Your fleet is already deployed.");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_drains_feed() -> anyhow::Result<()> {
    let (dispatcher, sink, message_log) = dispatcher(7);
    let mut feed = InMemoryFeed::new(vec![
        msg("alice", 0, "/begingame"),
        msg("bob", 1, "/begingame"),
        msg("alice", 2, "00 vertical"),
        msg("bob", 3, "09"),
    ]);
    let handled = dispatcher.run(&mut feed).await?;
    assert_eq!(handled, 4);
    assert_eq!(message_log.len(), 4);
    assert_eq!(
        sink.bodies_for("thread-alice"),
        vec!["Please place your carrier.", "Please place your battleship."]
    );
    assert_eq!(
        sink.bodies_for("thread-bob"),
        vec![
            "Please place your carrier.",
            "Invalid coordinates, please place your carrier."
        ]
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_opponents_are_independent() -> anyhow::Result<()> {
    let (dispatcher, sink, _) = dispatcher(8);
    let dispatcher = Arc::new(dispatcher);
    let mut tasks = Vec::new();
    for n in 0..12 {
        let dispatcher = dispatcher.clone();
        tasks.push(tokio::spawn(async move {
            let opponent = format!("p{}", n);
            for (i, body) in ["/begingame", "00", "10", "20", "30", "40"]
                .iter()
                .enumerate()
            {
                dispatcher.handle(&msg(&opponent, i, body)).await?;
            }
            Ok::<(), anyhow::Error>(())
        }));
    }
    for task in tasks {
        task.await??;
    }
    assert_eq!(dispatcher.registry().len(), 12);
    for n in 0..12 {
        let thread = format!("thread-p{}", n);
        let replies = sink.bodies_for(&thread);
        assert_eq!(replies.len(), 6);
        assert_eq!(replies[5], "You go first!");
    }
    Ok(())
}

/// Sink that fails every send while `broken` is set.
struct FlakySink {
    broken: AtomicBool,
    inner: InMemorySink,
}

#[async_trait::async_trait]
impl MessageSink for FlakySink {
    async fn send(&self, thread_id: &str, text: &str) -> anyhow::Result<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("network down"));
        }
        self.inner.send(thread_id, text).await
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_send_does_not_roll_back() -> anyhow::Result<()> {
    let sink = Arc::new(FlakySink {
        broken: AtomicBool::new(false),
        inner: InMemorySink::new(),
    });
    let message_log = InMemoryMessageLog::new();
    let dispatcher = Dispatcher::with_seed(
        GameConfig::default(),
        sink.clone(),
        Arc::new(message_log.clone()),
        9,
    )?;
    dispatcher.handle(&msg("alice", 0, "/begingame")).await?;

    sink.broken.store(true, Ordering::SeqCst);
    assert!(dispatcher.handle(&msg("alice", 1, "00")).await.is_err());
    sink.broken.store(false, Ordering::SeqCst);

    let session = dispatcher.registry().get("alice").unwrap();
    assert_eq!(
        session.lock().await.state(),
        SessionState::Awaiting(ShipClass::Battleship)
    );
    // the message is still logged
    assert_eq!(message_log.len(), 2);
    Ok(())
}

struct BrokenLog;

#[async_trait::async_trait]
impl MessageLog for BrokenLog {
    async fn append(&self, _msg: &InboundMessage) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("disk full"))
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_message_log_failure_is_swallowed() -> anyhow::Result<()> {
    let sink = InMemorySink::new();
    let dispatcher =
        Dispatcher::with_seed(GameConfig::default(), Arc::new(sink.clone()), Arc::new(BrokenLog), 4)?;

    dispatcher.handle(&msg("alice", 0, "/begingame")).await?;
    dispatcher.handle(&msg("alice", 1, "00")).await?;

    assert_eq!(
        sink.bodies_for("thread-alice"),
        vec!["Please place your carrier.", "Please place your battleship."]
    );
    let session = dispatcher.registry().get("alice").unwrap();
    assert_eq!(
        session.lock().await.state(),
        SessionState::Awaiting(ShipClass::Battleship)
    );
    Ok(())
}

#[test]
fn test_invalid_config_is_refused() {
    let result = Dispatcher::with_seed(
        GameConfig::with_board_size(3),
        Arc::new(InMemorySink::new()),
        Arc::new(InMemoryMessageLog::new()),
        0,
    );
    assert!(result.is_err());
    let result = Dispatcher::with_seed(
        GameConfig::with_board_size(usize::MAX),
        Arc::new(InMemorySink::new()),
        Arc::new(InMemoryMessageLog::new()),
        0,
    );
    assert!(result.is_err());
}
