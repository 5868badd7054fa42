// Hunt-and-follow targeting for the automated opponent.
//
// The opponent scans at random until it hits something, probes the
// neighbours of that hit, and once a second hit lines up it walks along the
// shared axis until the ship sinks. All knowledge carried between turns lives
// in `TargeterState`; the board supplies which cells are already resolved.

use alloc::vec::Vec;
use rand::Rng;

use crate::{
    board::Board,
    common::Coord,
    ship::{neighbors, offset, Orientation},
};

/// Which part of the hunt the opponent is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No live lead: fire anywhere unresolved.
    Search,
    /// One unresolved hit, direction unknown: probe its neighbours.
    Pursue,
    /// Two hits share an axis: keep following it.
    Committed,
}

/// Memory the opponent keeps between turns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TargeterState {
    hunt_queue: Vec<Coord>,
    last_hit: Option<Coord>,
    axis: Option<Orientation>,
}

/// Axis along which `hit` extends the run of struck ship cells ending at
/// `last`. Every cell strictly between the two must be a struck ship cell.
fn run_axis(last: Coord, hit: Coord, board: &Board) -> Option<Orientation> {
    let axis = if last.0 == hit.0 && last.1 != hit.1 {
        Orientation::Horizontal
    } else if last.1 == hit.1 && last.0 != hit.0 {
        Orientation::Vertical
    } else {
        return None;
    };
    let towards_last = direction(hit, last, axis);
    let mut cursor = hit;
    loop {
        cursor = offset(cursor, towards_last)?;
        if cursor == last {
            return Some(axis);
        }
        if !is_struck_ship(board, cursor) {
            return None;
        }
    }
}

/// Unit step from `from` towards `to`, which lie on `axis`.
fn direction(from: Coord, to: Coord, axis: Orientation) -> (isize, isize) {
    let (dr, dc) = axis.step();
    let forward = match axis {
        Orientation::Horizontal => to.1 > from.1,
        Orientation::Vertical => to.0 > from.0,
    };
    if forward {
        (dr, dc)
    } else {
        (-dr, -dc)
    }
}

fn is_open(board: &Board, coord: Coord) -> bool {
    matches!(board.is_hit(coord.0, coord.1), Ok(false))
}

fn is_struck_ship(board: &Board, coord: Coord) -> bool {
    board
        .cell(coord.0, coord.1)
        .map(|c| c.is_hit && c.has_ship)
        .unwrap_or(false)
}

impl TargeterState {
    /// Empty memory: the Search phase.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.hunt_queue.is_empty() {
            Phase::Search
        } else if self.axis.is_some() {
            Phase::Committed
        } else {
            Phase::Pursue
        }
    }

    /// Pending candidates, next-to-try first in the Committed phase.
    pub fn hunt_queue(&self) -> &[Coord] {
        &self.hunt_queue
    }

    pub fn last_hit(&self) -> Option<Coord> {
        self.last_hit
    }

    /// Axis being followed, if two hits have lined up.
    pub fn axis(&self) -> Option<Orientation> {
        self.axis
    }

    /// True when the state carries no lead at all.
    pub fn is_idle(&self) -> bool {
        self.hunt_queue.is_empty() && self.last_hit.is_none()
    }

    /// Forget everything and return to Search.
    pub fn clear(&mut self) {
        self.hunt_queue.clear();
        self.last_hit = None;
        self.axis = None;
    }

    /// Drop candidates that have been resolved since they were queued.
    fn prune(&mut self, board: &Board) {
        self.hunt_queue.retain(|&c| is_open(board, c));
    }

    fn enqueue(&mut self, coord: Coord) {
        if !self.hunt_queue.contains(&coord) {
            self.hunt_queue.push(coord);
        }
    }

    /// Pick the next cell to fire at on `board`.
    ///
    /// Returns `None` only when every cell is resolved, which a running match
    /// never reaches because the fleet is destroyed first.
    pub fn choose_target<R: Rng + ?Sized>(&mut self, board: &Board, rng: &mut R) -> Option<Coord> {
        self.prune(board);
        match self.phase() {
            Phase::Committed => Some(self.hunt_queue.remove(0)),
            Phase::Pursue => {
                let idx = rng.random_range(0..self.hunt_queue.len());
                Some(self.hunt_queue.remove(idx))
            }
            Phase::Search => {
                let open = board.unhit_cells().count();
                if open == 0 {
                    return None;
                }
                board.unhit_cells().nth(rng.random_range(0..open))
            }
        }
    }

    /// Fold the result of firing at `(row, col)` into the state. `board` must
    /// already include that shot.
    pub fn record_result(&mut self, row: usize, col: usize, was_hit: bool, board: &Board) {
        self.prune(board);
        if !was_hit {
            return;
        }
        let hit = (row, col);

        match self
            .last_hit
            .and_then(|last| run_axis(last, hit, board).map(|axis| (last, axis)))
        {
            Some((last, axis)) => self.commit(last, hit, axis, board),
            None => {
                // New target: probe every open neighbour.
                self.axis = None;
                for n in neighbors(hit).filter(|&n| is_open(board, n)) {
                    self.enqueue(n);
                }
            }
        }
        self.last_hit = Some(hit);

        let sunk = matches!(board.ship_at(row, col), Ok(Some(id)) if board.is_ship_sunk(id));
        if sunk {
            log::debug!("targeter: ship at ({}, {}) sunk, back to search", row, col);
            self.clear();
        }
    }

    /// Replace the queue with the single best cell along `axis` after hits at
    /// `last` then `hit`.
    fn commit(&mut self, last: Coord, hit: Coord, axis: Orientation, board: &Board) {
        self.hunt_queue.clear();
        let ahead = direction(last, hit, axis);

        // Keep going the way we were going.
        if let Some(next) = offset(hit, ahead).filter(|&c| is_open(board, c)) {
            self.axis = Some(axis);
            self.hunt_queue.push(next);
            return;
        }

        // Blocked: try just past the other end of the run of hits.
        let back = (-ahead.0, -ahead.1);
        let mut cursor = hit;
        while let Some(prev) = offset(cursor, back) {
            if is_struck_ship(board, prev) {
                cursor = prev;
                continue;
            }
            if is_open(board, prev) {
                self.axis = Some(axis);
                self.hunt_queue.push(prev);
                return;
            }
            break;
        }

        // Both ends closed: the hits belong to more than one ship.
        log::debug!(
            "targeter: axis {:?} through ({}, {}) exhausted, probing around it",
            axis,
            hit.0,
            hit.1
        );
        self.axis = None;
        for n in neighbors(hit).filter(|&n| is_open(board, n)) {
            self.enqueue(n);
        }
    }
}
