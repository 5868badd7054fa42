//! Match rules: two boards, whose turn it is, and what the last shot did.
//!
//! [`MatchState`] is a plain value with no clock and no locking. Hosts that
//! need the opponent's delayed reply or concurrent callers wrap it in
//! [`crate::MatchController`].

use core::fmt;
use rand::Rng;

use crate::{
    board::Board,
    common::{Coord, MatchError, Outcome, Side},
    config::BOARD_SIZE,
    placer::standard_board,
    resolver::{check_win, resolve},
    targeter::TargeterState,
};

/// Human-facing state of the match after the latest action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Fresh match, waiting for the player.
    PlayersTurn,
    Hit(Side),
    Miss(Side),
    /// The side fired at a cell it had already resolved.
    AlreadyResolved(Side),
    PlayerWins,
    OpponentWins,
}

impl Status {
    fn after(actor: Side, outcome: Outcome) -> Status {
        match outcome {
            Outcome::Hit => Status::Hit(actor),
            Outcome::Miss => Status::Miss(actor),
            Outcome::AlreadyResolved => Status::AlreadyResolved(actor),
        }
    }

    fn won_by(side: Side) -> Status {
        match side {
            Side::Player => Status::PlayerWins,
            Side::Opponent => Status::OpponentWins,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::PlayersTurn => write!(f, "Player's Turn"),
            Status::Hit(side) => write!(f, "{} Hit!", side),
            Status::Miss(side) => write!(f, "{} Miss!", side),
            Status::AlreadyResolved(side) => write!(f, "{} already fired there", side),
            Status::PlayerWins => write!(f, "Player Wins!"),
            Status::OpponentWins => write!(f, "Opponent Wins!"),
        }
    }
}

/// What a single accepted attack did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub actor: Side,
    pub coord: Coord,
    pub outcome: Outcome,
    /// Set on the one attack that finishes the match.
    pub winner: Option<Side>,
}

/// Complete state of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    /// The player's fleet; the opponent fires here.
    player_board: Board,
    /// The opponent's fleet; the player fires here.
    opponent_board: Board,
    turn: Side,
    status: Status,
    winner: Option<Side>,
    targeter: TargeterState,
    player_shots: usize,
    opponent_shots: usize,
}

impl MatchState {
    /// New match with both fleets placed from `rng`, player to move.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let player_board = standard_board(rng);
        let opponent_board = standard_board(rng);
        Self::from_boards(player_board, opponent_board)
    }

    /// New match over prepared boards, player to move.
    pub fn from_boards(player_board: Board, opponent_board: Board) -> Self {
        Self {
            player_board,
            opponent_board,
            turn: Side::Player,
            status: Status::PlayersTurn,
            winner: None,
            targeter: TargeterState::new(),
            player_shots: 0,
            opponent_shots: 0,
        }
    }

    /// Board owned by `side`.
    pub fn board(&self, side: Side) -> &Board {
        match side {
            Side::Player => &self.player_board,
            Side::Opponent => &self.opponent_board,
        }
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    pub fn opponent_board(&self) -> &Board {
        &self.opponent_board
    }

    /// Side allowed to attack next.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// The opponent's targeting memory.
    pub fn targeter(&self) -> &TargeterState {
        &self.targeter
    }

    /// Accepted, state-changing shots fired by `side`.
    pub fn shots(&self, side: Side) -> usize {
        match side {
            Side::Player => self.player_shots,
            Side::Opponent => self.opponent_shots,
        }
    }

    /// `actor` fires at `(row, col)` on the other side's board.
    ///
    /// Errors leave the state untouched. Re-firing at a resolved cell is
    /// accepted as [`Outcome::AlreadyResolved`] and keeps the turn with
    /// `actor`. Otherwise the turn passes unless the shot won the match.
    ///
    /// Every opponent shot, including one fired by the host rather than
    /// [`MatchState::opponent_move`], is folded into the targeter's memory.
    pub fn attack(
        &mut self,
        actor: Side,
        row: usize,
        col: usize,
    ) -> Result<AttackReport, MatchError> {
        if let Some(winner) = self.winner {
            return Err(MatchError::MatchOver { winner });
        }
        if actor != self.turn {
            return Err(MatchError::InvalidTurn { actor });
        }
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(MatchError::OutOfBounds { row, col });
        }

        let target = actor.opponent();
        let (board, outcome) = resolve(self.board(target), row, col)?;
        let mut report = AttackReport {
            actor,
            coord: (row, col),
            outcome,
            winner: None,
        };
        self.status = Status::after(actor, outcome);
        if outcome == Outcome::AlreadyResolved {
            return Ok(report);
        }

        match target {
            Side::Player => {
                self.player_board = board;
                self.opponent_shots += 1;
                self.targeter
                    .record_result(row, col, outcome == Outcome::Hit, &board);
            }
            Side::Opponent => {
                self.opponent_board = board;
                self.player_shots += 1;
            }
        }
        log::debug!("{} fired at ({}, {}): {:?}", actor, row, col, outcome);

        if let Some(winner) = check_win(&board, actor) {
            log::info!("{} destroyed the enemy fleet", winner);
            self.winner = Some(winner);
            self.status = Status::won_by(winner);
            report.winner = Some(winner);
        } else {
            self.turn = target;
        }
        Ok(report)
    }

    /// Let the opponent take its turn.
    ///
    /// A no-op returning `None` when the match is decided or it is not the
    /// opponent's turn.
    pub fn opponent_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<AttackReport> {
        if self.winner.is_some() || self.turn != Side::Opponent {
            return None;
        }
        let Some((row, col)) = self.targeter.choose_target(&self.player_board, rng) else {
            log::error!("opponent has no target left but the match is undecided");
            return None;
        };
        match self.attack(Side::Opponent, row, col) {
            Ok(report) => Some(report),
            Err(e) => {
                log::error!("opponent shot at ({}, {}) rejected: {}", row, col, e);
                None
            }
        }
    }

    /// Fresh fleets for both sides, cleared opponent memory, player to move.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::new(rng);
        log::info!("match reset");
    }
}
