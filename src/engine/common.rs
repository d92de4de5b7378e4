//! Error types shared by the board, the command parser and the session.

use core::fmt;

use super::ship::ShipClass;

/// Why a placement was refused by a [`Board`](super::board::Board).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// At least one covered cell lies outside the grid.
    OutOfBounds,
    /// At least one covered cell is already occupied.
    Overlap,
    /// Random placement gave up after exhausting its attempt budget.
    UnableToPlace,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "Ship placement is out of bounds"),
            PlacementError::Overlap => write!(f, "Ship placement overlaps with another ship"),
            PlacementError::UnableToPlace => write!(f, "Unable to place ship"),
        }
    }
}

/// Why a raw placement command could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The command held no tokens.
    Empty,
    /// The coordinate token was not exactly two digits.
    BadCoordinate,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "Command is empty"),
            CommandError::BadCoordinate => {
                write!(f, "Coordinate must be two digits, e.g. \"34\"")
            }
        }
    }
}

/// Errors produced while a [`GameSession`](super::session::GameSession) handles input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The command parsed but the board refused the ship.
    Placement(PlacementError),
    /// The command could not be parsed.
    Malformed(CommandError),
    /// Setup already finished; combat turns are not handled.
    AlreadyStarted,
    /// The computer fleet could not be laid out on the configured board.
    FleetDoesNotFit { ship: ShipClass },
}

impl From<PlacementError> for SessionError {
    fn from(err: PlacementError) -> Self {
        SessionError::Placement(err)
    }
}

impl From<CommandError> for SessionError {
    fn from(err: CommandError) -> Self {
        SessionError::Malformed(err)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Placement(e) => write!(f, "Placement rejected: {}", e),
            SessionError::Malformed(e) => write!(f, "Malformed command: {}", e),
            SessionError::AlreadyStarted => write!(f, "Setup already complete"),
            SessionError::FleetDoesNotFit { ship } => {
                write!(f, "Could not fit the computer's {} on the board", ship)
            }
        }
    }
}

/// Errors returned when validating a [`GameConfig`](super::config::GameConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The board has no cells.
    EmptyBoard,
    /// The board is wider than a two-digit coordinate can reach.
    BoardTooLarge { board_size: usize, max: usize },
    /// The fleet has no ships.
    EmptyFleet,
    /// A ship is longer than the board is wide.
    ShipTooLong { ship: ShipClass, board_size: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyBoard => write!(f, "Board size must be at least 1"),
            ConfigError::BoardTooLarge { board_size, max } => {
                write!(f, "Board size {} exceeds the maximum of {}", board_size, max)
            }
            ConfigError::EmptyFleet => write!(f, "Fleet must contain at least one ship"),
            ConfigError::ShipTooLong { ship, board_size } => write!(
                f,
                "The {} (length {}) does not fit on a {}x{} board",
                ship,
                ship.length(),
                board_size,
                board_size
            ),
        }
    }
}

/// Request-level rejections raised while routing chat input to sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// A game command arrived from someone with no active session.
    UnknownOpponent,
    /// "/begingame" arrived while the sender already has a session.
    AlreadyInProgress,
    /// Creating the session itself failed.
    Session(SessionError),
}

impl From<SessionError> for DispatchError {
    fn from(err: SessionError) -> Self {
        DispatchError::Session(err)
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownOpponent => write!(f, "No game in progress for this opponent"),
            DispatchError::AlreadyInProgress => write!(f, "A game is already in progress"),
            DispatchError::Session(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
#[cfg(feature = "std")]
impl std::error::Error for CommandError {}
#[cfg(feature = "std")]
impl std::error::Error for SessionError {}
#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
#[cfg(feature = "std")]
impl std::error::Error for DispatchError {}
