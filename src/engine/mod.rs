//! Core battleship setup engine (no_std compatible)
//!
//! Board model, ship placement and the per-opponent setup state machine.
//! Everything here is pure logic over `alloc`; chat plumbing lives in the
//! std-only modules at the crate root.

pub mod board;
pub mod command;
pub mod common;
pub mod config;
pub mod session;
pub mod ship;

// Re-export commonly used types
pub use board::{Board, Coordinate};
pub use command::{ChatCommand, PlacementCommand};
pub use common::{CommandError, ConfigError, DispatchError, PlacementError, SessionError};
pub use config::*;
pub use session::{auto_place_ship, GameSession, PlacementOutcome, SessionSnapshot, SessionState};
pub use ship::{Orientation, Placement, ShipClass};
