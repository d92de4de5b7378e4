//! Commonly used types and utilities for ease of import.

pub use crate::{Board, GameConfig, GameSession, Orientation, PlacementOutcome, ShipClass};

#[cfg(feature = "std")]
pub use crate::{Dispatcher, InMemoryMessageLog, InMemorySink, InboundMessage, SessionRegistry};

#[cfg(feature = "std")]
pub use crate::transport::{InboundFeed, MessageSink};
