#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod engine;
#[cfg(feature = "std")]
pub mod dispatcher;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod message_log;
pub mod prelude;
#[cfg(feature = "std")]
pub mod registry;
#[cfg(feature = "std")]
pub mod transport;

pub use engine::*;
#[cfg(feature = "std")]
pub use dispatcher::Dispatcher;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
#[cfg(feature = "std")]
pub use message_log::{InMemoryMessageLog, LoggedMessage, MessageLog};
#[cfg(feature = "std")]
pub use registry::{SessionRegistry, SharedSession};
#[cfg(feature = "std")]
pub use transport::{
    console::{ConsoleFeed, ConsoleSink},
    in_memory::{InMemoryFeed, InMemorySink},
    InboundFeed, InboundMessage, MessageSink, OutboundMessage,
};
