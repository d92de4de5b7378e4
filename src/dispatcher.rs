//! Routes inbound chat messages to game sessions and replies to the sink.

#![cfg(feature = "std")]

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::engine::{ChatCommand, DispatchError, GameConfig, GameSession, PlacementOutcome};
use crate::message_log::MessageLog;
use crate::registry::SessionRegistry;
use crate::transport::{InboundFeed, InboundMessage, MessageSink};

pub struct Dispatcher {
    registry: Arc<SessionRegistry>,
    sink: Arc<dyn MessageSink>,
    message_log: Arc<dyn MessageLog>,
    config: GameConfig,
    /// Seeds one `SmallRng` per new session.
    seeder: Mutex<SmallRng>,
}

impl Dispatcher {
    /// Create a dispatcher whose computer fleets are seeded from the thread RNG.
    pub fn new(
        config: GameConfig,
        sink: Arc<dyn MessageSink>,
        message_log: Arc<dyn MessageLog>,
    ) -> anyhow::Result<Self> {
        let mut seed_rng = rand::rng();
        Self::with_rng(config, sink, message_log, SmallRng::from_rng(&mut seed_rng))
    }

    /// Create a dispatcher with reproducible computer fleets.
    pub fn with_seed(
        config: GameConfig,
        sink: Arc<dyn MessageSink>,
        message_log: Arc<dyn MessageLog>,
        seed: u64,
    ) -> anyhow::Result<Self> {
        Self::with_rng(config, sink, message_log, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: GameConfig,
        sink: Arc<dyn MessageSink>,
        message_log: Arc<dyn MessageLog>,
        seeder: SmallRng,
    ) -> anyhow::Result<Self> {
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(Self {
            registry: Arc::new(SessionRegistry::new()),
            sink,
            message_log,
            config,
            seeder: Mutex::new(seeder),
        })
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Handle one inbound message to completion, then append it to the
    /// message log. A log failure is reported but does not fail the call.
    pub async fn handle(&self, msg: &InboundMessage) -> anyhow::Result<()> {
        log::info!("{} in {}: {:?}", msg.opponent_id, msg.thread_id, msg.body);
        let result = match ChatCommand::parse(&msg.body) {
            ChatCommand::BeginGame => self.begin_game(msg).await,
            ChatCommand::Help => self.reply(&msg.thread_id, &self.config.templates.help).await,
            ChatCommand::EndGame => self.end_game(msg).await,
            ChatCommand::Text(text) => self.place(msg, text).await,
        };
        if let Err(e) = self.message_log.append(msg).await {
            log::warn!(
                "failed to log message {} in {}: {:#}",
                msg.message_id,
                msg.thread_id,
                e
            );
        }
        result
    }

    /// Pump `feed` until it is exhausted. Failures of single messages are
    /// logged and skipped. Returns the number of messages handled.
    pub async fn run<F: InboundFeed + ?Sized>(&self, feed: &mut F) -> anyhow::Result<usize> {
        let mut handled = 0;
        while let Some(msg) = feed.recv().await? {
            if let Err(e) = self.handle(&msg).await {
                log::warn!(
                    "message {} from {} failed: {:#}",
                    msg.message_id,
                    msg.opponent_id,
                    e
                );
            }
            handled += 1;
        }
        Ok(handled)
    }

    fn session_rng(&self) -> SmallRng {
        let mut seeder = self.seeder.lock().unwrap_or_else(PoisonError::into_inner);
        SmallRng::from_rng(&mut *seeder)
    }

    async fn begin_game(&self, msg: &InboundMessage) -> anyhow::Result<()> {
        let mut rng = self.session_rng();
        let created = self.registry.create(&msg.opponent_id, || {
            GameSession::begin(
                msg.opponent_id.clone(),
                msg.thread_id.clone(),
                self.config.clone(),
                &mut rng,
            )
        });
        match created {
            Ok(session) => {
                let session = session.lock().await;
                log::info!("{} began a game", session.opponent_id());
                self.reply(session.thread_id(), &session.current_prompt())
                    .await
            }
            Err(DispatchError::AlreadyInProgress) => {
                log::warn!("{} already has a game in progress", msg.opponent_id);
                self.reply(&msg.thread_id, &self.config.templates.already_in_progress)
                    .await
            }
            Err(e) => Err(anyhow::anyhow!(e)),
        }
    }

    async fn end_game(&self, msg: &InboundMessage) -> anyhow::Result<()> {
        match self.registry.remove(&msg.opponent_id) {
            Some(session) => {
                let thread_id = session.lock().await.thread_id().to_string();
                log::info!("{} ended their game", msg.opponent_id);
                self.reply(&thread_id, &self.config.templates.game_over).await
            }
            None => self.reject_unknown(msg).await,
        }
    }

    async fn place(&self, msg: &InboundMessage, text: &str) -> anyhow::Result<()> {
        let session = match self.registry.get(&msg.opponent_id) {
            Some(session) => session,
            None => return self.reject_unknown(msg).await,
        };
        // held until the reply is out, so one opponent's turns never interleave
        let mut session = session.lock().await;
        let outcome = session.on_placement_command(text);
        match outcome {
            PlacementOutcome::Rejected { error, .. } => {
                log::warn!("{}: {}", msg.opponent_id, error);
            }
            PlacementOutcome::Started { .. } => {
                log::info!("{} finished placing their fleet", msg.opponent_id);
            }
            PlacementOutcome::Placed { .. } => {}
        }
        let reply = session.reply(&outcome);
        self.reply(session.thread_id(), &reply).await
    }

    async fn reject_unknown(&self, msg: &InboundMessage) -> anyhow::Result<()> {
        log::warn!("{}: {}", msg.opponent_id, DispatchError::UnknownOpponent);
        self.reply(&msg.thread_id, &self.config.templates.no_game)
            .await
    }

    async fn reply(&self, thread_id: &str, text: &str) -> anyhow::Result<()> {
        self.sink.send(thread_id, text).await
    }
}
