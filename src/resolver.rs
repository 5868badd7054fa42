//! Applying a single attack to a board and deciding the match.

use crate::board::Board;
use crate::common::{BoardError, Outcome, Side};

/// Fire at `(row, col)`.
///
/// A cell that was already attacked yields [`Outcome::AlreadyResolved`] and an
/// unchanged board. Coordinates off the grid fail before anything changes.
pub fn resolve(board: &Board, row: usize, col: usize) -> Result<(Board, Outcome), BoardError> {
    let cell = board.cell(row, col)?;
    if cell.is_hit {
        return Ok((*board, Outcome::AlreadyResolved));
    }
    let next = board.with_cell_hit(row, col)?;
    let outcome = if cell.has_ship {
        Outcome::Hit
    } else {
        Outcome::Miss
    };
    Ok((next, outcome))
}

/// The side that just attacked `board` wins if it destroyed the fleet on it.
pub fn check_win(board: &Board, attacker: Side) -> Option<Side> {
    board.is_fleet_destroyed().then_some(attacker)
}
