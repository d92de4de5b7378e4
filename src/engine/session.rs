//! Per-opponent setup state machine.
//!
//! A session owns the player's board and a computer board that is filled at
//! creation. The player then places the configured fleet one ship at a time,
//! strictly in fleet order; the session is `Started` once the last ship lands.

use alloc::string::String;
use alloc::vec::Vec;
use rand::Rng;

use super::board::Board;
use super::command::PlacementCommand;
use super::common::SessionError;
use super::config::{GameConfig, MessageTemplates, MAX_AUTO_PLACE_ATTEMPTS};
use super::ship::{Placement, ShipClass};

/// Where a session is in setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    /// Waiting for the player to place this ship.
    Awaiting(ShipClass),
    /// All ships placed.
    Started,
}

/// Result of feeding one placement command to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// `ship` was placed and `next` is now expected.
    Placed { ship: ShipClass, next: ShipClass },
    /// `ship` was the last one; the game has started.
    Started { ship: ShipClass },
    /// Nothing changed. `ship` is still expected, unless setup is over.
    Rejected {
        ship: Option<ShipClass>,
        error: SessionError,
    },
}

impl PlacementOutcome {
    /// Returns `true` if the board was written.
    pub fn accepted(&self) -> bool {
        !matches!(self, PlacementOutcome::Rejected { .. })
    }
}

/// Serializable view of a session, used for summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub opponent_id: String,
    pub thread_id: String,
    pub state: SessionState,
    pub placed: Vec<ShipClass>,
    pub pending: Vec<ShipClass>,
    pub player_board: Vec<Vec<usize>>,
    pub computer_cells: usize,
}

pub struct GameSession {
    opponent_id: String,
    thread_id: String,
    config: GameConfig,
    player_board: Board,
    computer_board: Board,
    /// Index into `config.fleet` of the next ship to place.
    next_ship: usize,
}

impl GameSession {
    /// Start a game against `opponent_id`: lay out the computer fleet at
    /// random and wait for the player's first ship.
    pub fn begin<R: Rng + ?Sized>(
        opponent_id: impl Into<String>,
        thread_id: impl Into<String>,
        config: GameConfig,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let mut computer_board = Board::new(config.board_size);
        for &ship in config.fleet.iter() {
            auto_place_ship(&mut computer_board, rng, ship)?;
        }
        let session = Self {
            opponent_id: opponent_id.into(),
            thread_id: thread_id.into(),
            player_board: Board::new(config.board_size),
            computer_board,
            config,
            next_ship: 0,
        };
        log::debug!(
            "session for {} created, computer fleet covers {} cells",
            session.opponent_id,
            session.computer_board.occupied_cells()
        );
        Ok(session)
    }

    pub fn opponent_id(&self) -> &str {
        &self.opponent_id
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    pub fn computer_board(&self) -> &Board {
        &self.computer_board
    }

    /// Ship the player must place next, if setup is not finished.
    pub fn current_ship(&self) -> Option<ShipClass> {
        self.config.fleet.get(self.next_ship).copied()
    }

    pub fn state(&self) -> SessionState {
        match self.current_ship() {
            Some(ship) => SessionState::Awaiting(ship),
            None => SessionState::Started,
        }
    }

    /// Returns `true` once every ship in the fleet is placed.
    pub fn is_started(&self) -> bool {
        self.next_ship >= self.config.fleet.len()
    }

    /// Returns `true` if the fleet entry at `index` has been placed.
    pub fn is_placed(&self, index: usize) -> bool {
        index < self.next_ship.min(self.config.fleet.len())
    }

    /// Ships already on the player's board, in placement order.
    pub fn placed_ships(&self) -> &[ShipClass] {
        &self.config.fleet[..self.next_ship.min(self.config.fleet.len())]
    }

    /// Ships still to be placed, in placement order.
    pub fn pending_ships(&self) -> &[ShipClass] {
        &self.config.fleet[self.next_ship.min(self.config.fleet.len())..]
    }

    /// Interpret `raw` as a placement of the current ship.
    pub fn on_placement_command(&mut self, raw: &str) -> PlacementOutcome {
        let ship = match self.current_ship() {
            Some(ship) => ship,
            None => {
                return PlacementOutcome::Rejected {
                    ship: None,
                    error: SessionError::AlreadyStarted,
                }
            }
        };
        let command = match raw.parse::<PlacementCommand>() {
            Ok(command) => command,
            Err(e) => {
                log::debug!("{}: unparsable placement {:?}: {}", self.opponent_id, raw, e);
                return PlacementOutcome::Rejected {
                    ship: Some(ship),
                    error: e.into(),
                };
            }
        };
        let placement = Placement::for_class(ship, command.anchor, command.orientation);
        if let Err(e) = self.player_board.try_place(&placement) {
            log::debug!("{}: {} rejected: {}", self.opponent_id, ship, e);
            return PlacementOutcome::Rejected {
                ship: Some(ship),
                error: e.into(),
            };
        }

        self.next_ship += 1;
        match self.current_ship() {
            Some(next) => {
                log::debug!("{}: placed {}, awaiting {}", self.opponent_id, ship, next);
                PlacementOutcome::Placed { ship, next }
            }
            None => {
                log::debug!(
                    "{}: fleet deployed\n{}",
                    self.opponent_id,
                    self.player_board
                );
                PlacementOutcome::Started { ship }
            }
        }
    }

    /// Prompt describing what the session is waiting for.
    pub fn current_prompt(&self) -> String {
        let templates = &self.config.templates;
        match self.current_ship() {
            Some(ship) => MessageTemplates::render(&templates.next_ship, ship),
            None => templates.start.clone(),
        }
    }

    /// The single chat reply for `outcome`.
    pub fn reply(&self, outcome: &PlacementOutcome) -> String {
        let templates = &self.config.templates;
        match *outcome {
            PlacementOutcome::Placed { next, .. } => {
                MessageTemplates::render(&templates.next_ship, next)
            }
            PlacementOutcome::Started { .. } => templates.start.clone(),
            PlacementOutcome::Rejected {
                ship: Some(ship), ..
            } => MessageTemplates::render(&templates.invalid_placement, ship),
            PlacementOutcome::Rejected { ship: None, .. } => templates.already_started.clone(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            opponent_id: self.opponent_id.clone(),
            thread_id: self.thread_id.clone(),
            state: self.state(),
            placed: self.placed_ships().to_vec(),
            pending: self.pending_ships().to_vec(),
            player_board: self.player_board.rows().map(|row| row.to_vec()).collect(),
            computer_cells: self.computer_board.occupied_cells(),
        }
    }
}

/// Put one computer ship of `ship`'s class somewhere random on `board`.
pub fn auto_place_ship<R: Rng + ?Sized>(
    board: &mut Board,
    rng: &mut R,
    ship: ShipClass,
) -> Result<Placement, SessionError> {
    board
        .auto_place(rng, ship.length(), MAX_AUTO_PLACE_ATTEMPTS)
        .map_err(|_| SessionError::FleetDoesNotFit { ship })
}
