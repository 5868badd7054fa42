//! Board snapshots: ship occupancy, resolved cells and ship identities.
//!
//! A [`Board`] is a small `Copy` value. Every update returns a new snapshot
//! and leaves the receiver untouched, so a holder of an older snapshot never
//! observes a half-applied change.

use core::fmt;

use crate::bitboard::BitBoard;
use crate::common::{BoardError, Coord};
use crate::config::BOARD_SIZE;
use crate::ship::{Orientation, Placement, ShipId};

/// Cell mask sized for the standard grid.
pub type Mask = BitBoard<u128, BOARD_SIZE>;

/// View of one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    /// The cell has been attacked (hit or miss).
    pub is_hit: bool,
    pub has_ship: bool,
    pub ship_id: Option<ShipId>,
}

/// Immutable snapshot of one side's grid.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    ships: Mask,
    hits: Mask,
    ship_ids: [[Option<ShipId>; BOARD_SIZE]; BOARD_SIZE],
}

fn check_bounds(row: usize, col: usize) -> Result<(), BoardError> {
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        Err(BoardError::OutOfBounds { row, col })
    } else {
        Ok(())
    }
}

impl Board {
    /// All cells open water, nothing attacked.
    pub fn empty() -> Self {
        Board {
            ships: Mask::new(),
            hits: Mask::new(),
            ship_ids: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Snapshot with the run described by the arguments marked as ship `id`.
    ///
    /// No legality check is made: cells off the board are skipped and an
    /// existing ship underneath is overwritten. Validate with
    /// [`Board::can_place`] first.
    pub fn with_ship_marked(
        &self,
        row: usize,
        col: usize,
        length: usize,
        orientation: Orientation,
        id: ShipId,
    ) -> Board {
        let mut next = *self;
        for (r, c) in Placement::new(row, col, length, orientation).cells() {
            if let Ok(ships) = next.ships.with(r, c) {
                next.ships = ships;
                next.ship_ids[r][c] = Some(id);
            }
        }
        next
    }

    /// Snapshot with `(row, col)` attacked. Attacking a resolved cell returns
    /// an identical snapshot.
    pub fn with_cell_hit(&self, row: usize, col: usize) -> Result<Board, BoardError> {
        let mut next = *self;
        next.hits = self.hits.with(row, col)?;
        Ok(next)
    }

    /// Whether `placement` stays on the board and covers only open water.
    pub fn can_place(&self, placement: &Placement) -> bool {
        placement.in_bounds()
            && placement
                .cells()
                .all(|(r, c)| !self.ships.contains(r, c).unwrap_or(true))
    }

    /// View of a single cell.
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        check_bounds(row, col)?;
        Ok(Cell {
            row,
            col,
            is_hit: self.hits.contains(row, col)?,
            has_ship: self.ships.contains(row, col)?,
            ship_id: self.ship_ids[row][col],
        })
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..BOARD_SIZE * BOARD_SIZE).map(move |i| {
            let (row, col) = (i / BOARD_SIZE, i % BOARD_SIZE);
            Cell {
                row,
                col,
                is_hit: self.hits.contains(row, col).unwrap_or(false),
                has_ship: self.ships.contains(row, col).unwrap_or(false),
                ship_id: self.ship_ids[row][col],
            }
        })
    }

    pub fn is_hit(&self, row: usize, col: usize) -> Result<bool, BoardError> {
        self.hits.contains(row, col)
    }

    pub fn has_ship(&self, row: usize, col: usize) -> Result<bool, BoardError> {
        self.ships.contains(row, col)
    }

    /// Ship occupying `(row, col)`, if any.
    pub fn ship_at(&self, row: usize, col: usize) -> Result<Option<ShipId>, BoardError> {
        check_bounds(row, col)?;
        Ok(self.ship_ids[row][col])
    }

    /// Mask of cells holding a ship.
    pub fn ship_mask(&self) -> Mask {
        self.ships
    }

    /// Mask of attacked cells.
    pub fn hit_mask(&self) -> Mask {
        self.hits
    }

    /// Cells not yet attacked, row-major.
    pub fn unhit_cells(&self) -> impl Iterator<Item = Coord> {
        (!self.hits).iter()
    }

    /// Number of attacked cells.
    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    /// True when no ship segment is left unhit.
    pub fn is_fleet_destroyed(&self) -> bool {
        (self.ships & !self.hits).is_empty()
    }

    /// Cells belonging to ship `id`, row-major.
    pub fn ship_cells(&self, id: ShipId) -> impl Iterator<Item = Coord> + '_ {
        self.ships
            .iter()
            .filter(move |&(r, c)| self.ship_ids[r][c] == Some(id))
    }

    /// True when every cell of ship `id` has been hit. An id with no cells on
    /// the board is never sunk.
    pub fn is_ship_sunk(&self, id: ShipId) -> bool {
        let mut cells = self.ship_cells(id).peekable();
        cells.peek().is_some() && cells.all(|(r, c)| self.hits.contains(r, c).unwrap_or(false))
    }

    /// Distinct ship ids present, ascending.
    pub fn ship_ids(&self) -> impl Iterator<Item = ShipId> + '_ {
        let mut seen = [false; 256];
        self.ships.iter().filter_map(move |(r, c)| {
            let id = self.ship_ids[r][c]?;
            let slot = &mut seen[id.get() as usize];
            if *slot {
                None
            } else {
                *slot = true;
                Some(id)
            }
        })
    }

    /// Number of ships with at least one unhit segment.
    pub fn remaining_ships(&self) -> usize {
        let mut afloat = [false; 256];
        for (r, c) in (self.ships & !self.hits).iter() {
            if let Some(id) = self.ship_ids[r][c] {
                afloat[id.get() as usize] = true;
            }
        }
        afloat.iter().filter(|&&a| a).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Board {
    /// Full-truth rendering: `X` hit ship, `o` miss, `S` ship, `.` water.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for cell in self.cells() {
            if cell.col == 0 {
                write!(f, "  ")?;
            }
            let ch = match (cell.has_ship, cell.is_hit) {
                (true, true) => 'X',
                (false, true) => 'o',
                (true, false) => 'S',
                (false, false) => '.',
            };
            write!(f, "{}", ch)?;
            if cell.col + 1 == BOARD_SIZE {
                writeln!(f)?;
            }
        }
        write!(f, "}}")
    }
}
