//! Decoding of inbound chat text.

use core::str::FromStr;

use super::board::Coordinate;
use super::common::CommandError;
use super::config::VERTICAL_KEYWORD;
use super::ship::Orientation;

/// What a chat message asks the bot to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand<'a> {
    /// Start a new game for the sender.
    BeginGame,
    /// Explain how to start a game.
    Help,
    /// Abandon the sender's game.
    EndGame,
    /// Anything else, handed to the sender's session as-is.
    Text(&'a str),
}

impl<'a> ChatCommand<'a> {
    /// Classify `body`. Slash commands match on prefix, ignoring ASCII case.
    /// The command must be the very first thing in the body.
    pub fn parse(body: &'a str) -> Self {
        if starts_with_ignore_case(body, "/begingame") {
            ChatCommand::BeginGame
        } else if starts_with_ignore_case(body, "/help") {
            ChatCommand::Help
        } else if starts_with_ignore_case(body, "/endgame") {
            ChatCommand::EndGame
        } else {
            ChatCommand::Text(body)
        }
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}

/// A decoded "place the current ship" command, e.g. `"34 vertical"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementCommand {
    pub anchor: Coordinate,
    pub orientation: Orientation,
}

impl FromStr for PlacementCommand {
    type Err = CommandError;

    /// The first token must be two digits, read as `x` then `y`. A second
    /// token exactly equal to `vertical` selects a vertical ship; any other
    /// token (including `Vertical`), or none, means horizontal. Further
    /// tokens are ignored.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut tokens = raw.split_whitespace();
        let coord = tokens.next().ok_or(CommandError::Empty)?;
        let mut digits = coord.chars().map(|ch| ch.to_digit(10));
        let (x, y) = match (digits.next(), digits.next(), digits.next()) {
            (Some(Some(x)), Some(Some(y)), None) => (x as usize, y as usize),
            _ => return Err(CommandError::BadCoordinate),
        };
        let vertical = tokens
            .next()
            .map_or(false, |token| token == VERTICAL_KEYWORD);
        Ok(PlacementCommand {
            anchor: Coordinate::new(x, y),
            orientation: Orientation::from_vertical(vertical),
        })
    }
}
