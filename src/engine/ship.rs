//! Ship classes, orientation and placement requests.

use core::fmt;

use super::board::Coordinate;

/// Orientation of a ship on the board.
///
/// Horizontal ships extend along `y` from the anchor, vertical ships extend
/// along `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Build an orientation from a "vertical?" flag.
    pub fn from_vertical(vertical: bool) -> Self {
        if vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }
}

/// The closed set of ship classes a fleet is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipClass {
    /// Carrier: length 5.
    Carrier,
    /// Battleship: length 4.
    Battleship,
    /// Cruiser: length 3.
    Cruiser,
    /// Submarine: length 3.
    Submarine,
    /// Destroyer: length 2.
    Destroyer,
}

impl ShipClass {
    /// Every ship class, in the classic placement order.
    pub const ALL: [ShipClass; 5] = [
        ShipClass::Carrier,
        ShipClass::Battleship,
        ShipClass::Cruiser,
        ShipClass::Submarine,
        ShipClass::Destroyer,
    ];

    /// Number of cells the ship occupies.
    pub const fn length(self) -> usize {
        match self {
            ShipClass::Carrier => 5,
            ShipClass::Battleship => 4,
            ShipClass::Cruiser => 3,
            ShipClass::Submarine => 3,
            ShipClass::Destroyer => 2,
        }
    }

    /// Lower-case name used in chat replies.
    pub const fn name(self) -> &'static str {
        match self {
            ShipClass::Carrier => "carrier",
            ShipClass::Battleship => "battleship",
            ShipClass::Cruiser => "cruiser",
            ShipClass::Submarine => "submarine",
            ShipClass::Destroyer => "destroyer",
        }
    }

    /// Look a class up by its name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|class| class.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ShipClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A transient request to put a ship of `length` cells at `anchor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub length: usize,
    pub anchor: Coordinate,
    pub orientation: Orientation,
}

impl Placement {
    pub fn new(length: usize, anchor: Coordinate, orientation: Orientation) -> Self {
        Self {
            length,
            anchor,
            orientation,
        }
    }

    /// Placement request for one ship of `class`.
    pub fn for_class(class: ShipClass, anchor: Coordinate, orientation: Orientation) -> Self {
        Self::new(class.length(), anchor, orientation)
    }

    /// The last cell covered by the ship, or `None` if it would overflow
    /// `usize` (or the ship has no cells at all).
    pub fn end(&self) -> Option<Coordinate> {
        let span = self.length.checked_sub(1)?;
        self.offset(span)
    }

    /// Coordinates of every cell covered by the ship, anchor first.
    ///
    /// Cells that would overflow `usize` are skipped; callers check
    /// [`Placement::end`] before trusting the span.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.length).filter_map(move |i| self.offset(i))
    }

    fn offset(&self, i: usize) -> Option<Coordinate> {
        let Coordinate { x, y } = self.anchor;
        match self.orientation {
            Orientation::Horizontal => Some(Coordinate::new(x, y.checked_add(i)?)),
            Orientation::Vertical => Some(Coordinate::new(x.checked_add(i)?, y)),
        }
    }
}
