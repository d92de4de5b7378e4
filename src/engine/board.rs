//! Square occupancy grid recording ship footprints.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use super::common::PlacementError;
use super::ship::{Orientation, Placement};

/// A cell position. `x` selects the row, `y` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

/// One side's N×N grid. Each cell is `0` when empty, otherwise the length of
/// the ship covering it.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<usize>,
}

impl Board {
    /// Create an empty `size`×`size` board.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Width (and height) of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value stored at (`x`, `y`), or `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<usize> {
        self.index(Coordinate::new(x, y)).map(|i| self.cells[i])
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell > 0).count()
    }

    /// Returns `true` when no ship has been placed.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == 0)
    }

    /// Iterate the grid one row (fixed `x`) at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        // chunks() panics on 0, and a 0×0 board has no rows anyway
        self.cells.chunks(self.size.max(1))
    }

    fn index(&self, coord: Coordinate) -> Option<usize> {
        if coord.x < self.size && coord.y < self.size {
            Some(coord.x * self.size + coord.y)
        } else {
            None
        }
    }

    /// Explain why `placement` would be refused, or `Ok(())` if it fits.
    /// Never mutates the board.
    pub fn check(&self, placement: &Placement) -> Result<(), PlacementError> {
        if placement.length == 0 {
            return Ok(());
        }
        // the span is a straight line, so the far end decides bounds
        match placement.end() {
            Some(end) if self.index(end).is_some() && self.index(placement.anchor).is_some() => {}
            _ => return Err(PlacementError::OutOfBounds),
        }
        for coord in placement.cells() {
            match self.index(coord) {
                Some(i) if self.cells[i] == 0 => {}
                Some(_) => return Err(PlacementError::Overlap),
                None => return Err(PlacementError::OutOfBounds),
            }
        }
        Ok(())
    }

    /// Validate and write `placement` in one step. On error nothing is written.
    pub fn try_place(&mut self, placement: &Placement) -> Result<(), PlacementError> {
        self.check(placement)?;
        for coord in placement.cells() {
            if let Some(i) = self.index(coord) {
                self.cells[i] = placement.length;
            }
        }
        Ok(())
    }

    /// Returns `true` if a ship of `length` fits at (`x`, `y`).
    pub fn can_place(&self, length: usize, x: usize, y: usize, orientation: Orientation) -> bool {
        self.check(&Placement::new(length, Coordinate::new(x, y), orientation))
            .is_ok()
    }

    /// Place a ship of `length` at (`x`, `y`) if it fits. Returns whether the
    /// ship was written.
    pub fn place(&mut self, length: usize, x: usize, y: usize, orientation: Orientation) -> bool {
        self.try_place(&Placement::new(length, Coordinate::new(x, y), orientation))
            .is_ok()
    }

    /// Drop a ship of `length` at a uniformly random anchor and orientation,
    /// retrying until it fits or `max_attempts` anchors have been tried.
    ///
    /// Retries favour the sparser parts of a filling board, so final layouts
    /// are not uniformly distributed.
    pub fn auto_place<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        length: usize,
        max_attempts: usize,
    ) -> Result<Placement, PlacementError> {
        if self.size == 0 {
            return Err(PlacementError::UnableToPlace);
        }
        for attempt in 1..=max_attempts {
            let anchor = Coordinate::new(
                rng.random_range(0..self.size),
                rng.random_range(0..self.size),
            );
            let orientation = Orientation::from_vertical(rng.random());
            let placement = Placement::new(length, anchor, orientation);
            if self.try_place(&placement).is_ok() {
                log::trace!(
                    "auto-placed length {} at ({}, {}) {:?} after {} attempt(s)",
                    length,
                    anchor.x,
                    anchor.y,
                    orientation,
                    attempt
                );
                return Ok(placement);
            }
        }
        Err(PlacementError::UnableToPlace)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for y in 0..self.size {
            write!(f, " {}", y % 10)?;
        }
        writeln!(f)?;
        for (x, row) in self.rows().enumerate().take(self.size) {
            write!(f, "{:>2}", x)?;
            for &cell in row {
                if cell == 0 {
                    write!(f, " .")?;
                } else {
                    write!(f, " {}", cell % 10)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Board {{ size: {}, occupied: {} }}\n{}",
            self.size,
            self.occupied_cells(),
            self
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_reports_out_of_bounds_before_overlap() {
        let mut board = Board::new(5);
        assert!(board.place(2, 0, 3, Orientation::Horizontal));
        let wide = Placement::new(3, Coordinate::new(0, 3), Orientation::Horizontal);
        assert_eq!(board.check(&wide), Err(PlacementError::OutOfBounds));
        let crossing = Placement::new(3, Coordinate::new(0, 2), Orientation::Vertical);
        assert_eq!(board.check(&crossing), Ok(()));
        let overlapping = Placement::new(2, Coordinate::new(0, 2), Orientation::Horizontal);
        assert_eq!(board.check(&overlapping), Err(PlacementError::Overlap));
    }

    #[test]
    fn huge_anchor_does_not_overflow() {
        let board = Board::new(10);
        assert!(!board.can_place(3, usize::MAX, 0, Orientation::Vertical));
        assert!(!board.can_place(3, 0, usize::MAX - 1, Orientation::Horizontal));
    }

    #[test]
    fn display_marks_ship_lengths() {
        let mut board = Board::new(3);
        assert!(board.place(2, 1, 0, Orientation::Horizontal));
        let text = alloc::format!("{}", board);
        assert!(text.contains(" 1 2 2 ."));
        assert!(text.contains(" 0 . . ."));
    }
}
