use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::common::ConfigError;
use super::ship::ShipClass;

pub const BOARD_SIZE: usize = 10;

/// Largest board a two-digit coordinate can address.
pub const MAX_BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;
pub const FLEET: [ShipClass; NUM_SHIPS] = ShipClass::ALL;

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Orientation token that selects a vertical ship. Anything else is horizontal.
pub const VERTICAL_KEYWORD: &str = "vertical";

/// Upper bound on random anchors tried per computer ship before giving up.
pub const MAX_AUTO_PLACE_ATTEMPTS: usize = 10_000;

/// Placeholder substituted with the ship name in templates.
const SHIP_PLACEHOLDER: &str = "{ship}";

/// Chat replies sent by the game. `{ship}` is replaced with a ship name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplates {
    pub next_ship: String,
    pub invalid_placement: String,
    pub start: String,
    pub already_started: String,
    pub already_in_progress: String,
    pub no_game: String,
    pub game_over: String,
    pub help: String,
}

impl MessageTemplates {
    /// Substitute `ship` into `template`.
    pub fn render(template: &str, ship: ShipClass) -> String {
        template.replace(SHIP_PLACEHOLDER, ship.name())
    }
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            next_ship: "Please place your {ship}.".to_string(),
            invalid_placement: "Invalid coordinates, please place your {ship}.".to_string(),
            start: "You go first!".to_string(),
            already_started: "Your fleet is already deployed.".to_string(),
            already_in_progress: "A game is already in progress.".to_string(),
            no_game: "No game in progress. Send /begingame to start one.".to_string(),
            game_over: "Game ended.".to_string(),
            help: "The command \"/begingame\" will start your battleship game!".to_string(),
        }
    }
}

/// Board dimension, fleet and reply texts for a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    /// Ships in the order the player must place them.
    pub fleet: Vec<ShipClass>,
    pub templates: MessageTemplates,
}

impl GameConfig {
    /// Classic fleet on a square board of `board_size`.
    pub fn with_board_size(board_size: usize) -> Self {
        Self {
            board_size,
            ..Self::default()
        }
    }

    /// Check that the board is addressable and every ship can fit on it
    /// when empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardTooLarge {
                board_size: self.board_size,
                max: MAX_BOARD_SIZE,
            });
        }
        if self.fleet.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        if let Some(&ship) = self
            .fleet
            .iter()
            .find(|ship| ship.length() > self.board_size)
        {
            return Err(ConfigError::ShipTooLong {
                ship,
                board_size: self.board_size,
            });
        }
        Ok(())
    }

    /// Number of cells the whole fleet covers.
    pub fn fleet_cells(&self) -> usize {
        self.fleet.iter().map(|ship| ship.length()).sum()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            fleet: FLEET.to_vec(),
            templates: MessageTemplates::default(),
        }
    }
}
