//! Shared vocabulary: sides, attack outcomes and error types.

use core::fmt;

/// A grid position as `(row, col)`.
pub type Coord = (usize, usize);

/// One of the two participants in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The human at the keyboard.
    Player,
    /// The automated opponent.
    Opponent,
}

impl Side {
    /// The other side.
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Opponent => write!(f, "Opponent"),
        }
    }
}

/// Classification of a single attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The cell held a ship segment.
    Hit,
    /// The cell was open water.
    Miss,
    /// The cell had been attacked before; nothing changed.
    AlreadyResolved,
}

/// Errors returned by board and placement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// A ship length that can never fit on the grid.
    ShipTooLong { length: usize },
    /// The fleet needs more cells than the board has free.
    FleetTooLarge { cells: usize, free: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col } => {
                write!(f, "Coordinate ({}, {}) is off the board", row, col)
            }
            BoardError::ShipTooLong { length } => {
                write!(f, "Ship of length {} cannot fit on the board", length)
            }
            BoardError::FleetTooLarge { cells, free } => write!(
                f,
                "Fleet needs {} cells but only {} are free",
                cells, free
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

/// Errors returned by match operations. No variant leaves a mutation behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// Coordinate outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// `actor` attacked while the turn belonged to the other side.
    InvalidTurn { actor: Side },
    /// The match already has a winner.
    MatchOver { winner: Side },
    /// Board-level failure other than a bad coordinate.
    Board(BoardError),
}

impl From<BoardError> for MatchError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::OutOfBounds { row, col } => MatchError::OutOfBounds { row, col },
            other => MatchError::Board(other),
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::OutOfBounds { row, col } => {
                write!(f, "Coordinate ({}, {}) is off the board", row, col)
            }
            MatchError::InvalidTurn { actor } => write!(f, "It is not the {}'s turn", actor),
            MatchError::MatchOver { winner } => {
                write!(f, "The match is over: {} won", winner)
            }
            MatchError::Board(e) => write!(f, "Board error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatchError {}
