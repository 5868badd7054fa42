//! Random fleet placement by rejection sampling.
//!
//! Each ship draws a uniformly random row, column and orientation until the
//! run lands on the board without touching another ship. There is no attempt
//! cap: a cap would skew the distribution away from uniform over legal
//! placements. Termination is almost sure for any fleet that passes the
//! up-front size checks in [`place_fleet`]; the standard fleet covers 17 of
//! 100 cells and typically needs a handful of draws per ship.

use rand::Rng;

use crate::board::Board;
use crate::common::BoardError;
use crate::config::BOARD_SIZE;
use crate::ship::{Orientation, Placement, ShipId};

/// First id handed out by [`place_fleet`].
pub const FIRST_SHIP_ID: ShipId = ShipId(1);

/// Draw one legal placement of a ship of `length` on `board`.
///
/// Loops until a draw is legal, so `length` must fit (see [`place_fleet`]).
pub fn random_placement<R: Rng + ?Sized>(board: &Board, length: usize, rng: &mut R) -> Placement {
    loop {
        let row = rng.random_range(0..BOARD_SIZE);
        let col = rng.random_range(0..BOARD_SIZE);
        let orientation = if rng.random_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let placement = Placement::new(row, col, length, orientation);
        if board.can_place(&placement) {
            return placement;
        }
    }
}

/// Place ships of `sizes`, in the given order, onto `board`. Ships get ids
/// 1, 2, 3, ... in that order.
pub fn place_fleet<R: Rng + ?Sized>(
    board: &Board,
    sizes: &[usize],
    rng: &mut R,
) -> Result<Board, BoardError> {
    if let Some(&length) = sizes.iter().find(|&&l| l == 0 || l > BOARD_SIZE) {
        return Err(BoardError::ShipTooLong { length });
    }
    let cells: usize = sizes.iter().sum();
    let free = BOARD_SIZE * BOARD_SIZE - board.ship_mask().len();
    if cells > free {
        return Err(BoardError::FleetTooLarge { cells, free });
    }

    Ok(place_checked(board, sizes, rng))
}

/// A fresh board carrying the standard fleet.
pub fn standard_board<R: Rng + ?Sized>(rng: &mut R) -> Board {
    place_checked(&Board::empty(), &crate::config::FLEET_SIZES, rng)
}

// Every size fits and the fleet fits in the free cells.
fn place_checked<R: Rng + ?Sized>(board: &Board, sizes: &[usize], rng: &mut R) -> Board {
    let mut next = *board;
    let mut id = FIRST_SHIP_ID;
    for &length in sizes {
        let p = random_placement(&next, length, rng);
        log::trace!(
            "placing {} at ({}, {}) {:?}",
            id,
            p.row,
            p.col,
            p.orientation
        );
        next = next.with_ship_marked(p.row, p.col, p.length, p.orientation, id);
        id = id.next();
    }
    next
}
