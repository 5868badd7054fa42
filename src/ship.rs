//! Ship identities and straight-line placements.

use core::fmt;

use crate::common::Coord;
use crate::config::BOARD_SIZE;

/// Axis a ship (or a line of hits) runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Unit step `(d_row, d_col)` along this axis.
    pub fn step(self) -> (isize, isize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// A named ship length from the fleet table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    name: &'static str,
    length: usize,
}

impl ShipClass {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Identifier shared by every cell of one ship. Placement hands them out
/// starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub u8);

impl ShipId {
    pub fn get(self) -> u8 {
        self.0
    }

    /// The id handed out after this one.
    pub fn next(self) -> ShipId {
        ShipId(self.0.wrapping_add(1))
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::config::class_name(*self) {
            Some(name) => write!(f, "{} (#{})", name, self.0),
            None => write!(f, "ship #{}", self.0),
        }
    }
}

/// A run of `length` cells starting at `(row, col)` along `orientation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub length: usize,
    pub orientation: Orientation,
}

impl Placement {
    pub fn new(row: usize, col: usize, length: usize, orientation: Orientation) -> Self {
        Self {
            row,
            col,
            length,
            orientation,
        }
    }

    /// Whether every cell of the run lies on the board.
    pub fn in_bounds(&self) -> bool {
        if self.row >= BOARD_SIZE || self.col >= BOARD_SIZE {
            return false;
        }
        match self.orientation {
            Orientation::Horizontal => self.col + self.length <= BOARD_SIZE,
            Orientation::Vertical => self.row + self.length <= BOARD_SIZE,
        }
    }

    /// Cells covered by the run, from the start outwards. Callers check
    /// [`Placement::in_bounds`] first; cells past the edge are still yielded.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let Placement {
            row,
            col,
            length,
            orientation,
        } = *self;
        (0..length).map(move |i| match orientation {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        })
    }
}

/// `coord` moved by `(d_row, d_col)`, or `None` when that leaves the board.
pub fn offset(coord: Coord, (d_row, d_col): (isize, isize)) -> Option<Coord> {
    let row = coord.0.checked_add_signed(d_row)?;
    let col = coord.1.checked_add_signed(d_col)?;
    (row < BOARD_SIZE && col < BOARD_SIZE).then_some((row, col))
}

/// In-bounds orthogonal neighbours of `coord`: up, down, left, right.
pub fn neighbors(coord: Coord) -> impl Iterator<Item = Coord> {
    [(-1, 0), (1, 0), (0, -1), (0, 1)]
        .into_iter()
        .filter_map(move |d| offset(coord, d))
}
