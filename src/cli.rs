#![cfg(feature = "std")]

//! Terminal rendering and input parsing for the interactive binary.
//!
//! The engine exposes full truth; hiding the opponent's unhit ships is done
//! here by rendering its board with `reveal = false`.

use std::fmt::Write as _;

use crate::{board::Board, config::BOARD_SIZE, game::MatchState, Coord};

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fire(Coord),
    Reset,
    Quit,
    Help,
}

/// `(row, col)` as shown to the user, e.g. `(4, 0)` is `A5`.
pub fn coord_to_string(row: usize, col: usize) -> String {
    let letter = (b'A' + col as u8) as char;
    format!("{}{}", letter, row + 1)
}

/// Parse `A5`-style input: column letter then 1-based row.
pub fn parse_coord(input: &str) -> Result<Coord, String> {
    let input = input.trim();
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or("Empty input")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= BOARD_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str = chars.as_str();
    if row_str.is_empty() {
        return Err("Missing row number (e.g., A5)".to_string());
    }
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok((row - 1, col))
}

/// Parse one line of input into a [`Command`].
pub fn parse_command(input: &str) -> Result<Command, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "r" | "reset" => Ok(Command::Reset),
        "h" | "help" | "?" => Ok(Command::Help),
        other => parse_coord(other).map(Command::Fire),
    }
}

/// Glyph for one cell. Unhit ships show only when `reveal` is set.
fn glyph(board: &Board, row: usize, col: usize, reveal: bool) -> char {
    match board.cell(row, col) {
        Ok(cell) if cell.is_hit && cell.has_ship => 'X',
        Ok(cell) if cell.is_hit => 'o',
        Ok(cell) if cell.has_ship && reveal => 'S',
        _ => '.',
    }
}

/// Render one board with column letters and row numbers.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let mut out = String::from("    ");
    for c in 0..BOARD_SIZE {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for r in 0..BOARD_SIZE {
        let _ = write!(out, "  {:2}", r + 1);
        for c in 0..BOARD_SIZE {
            let _ = write!(out, " {}", glyph(board, r, c, reveal));
        }
        out.push('\n');
    }
    out
}

/// Both boards as the player sees them, plus the status line.
pub fn render_match(state: &MatchState) -> String {
    format!(
        "Enemy waters ({} ships afloat)\n{}\nYour fleet ({} ships afloat)\n{}\n{}\n",
        state.opponent_board().remaining_ships(),
        render_board(state.opponent_board(), state.winner().is_some()),
        state.player_board().remaining_ships(),
        render_board(state.player_board(), true),
        state.status(),
    )
}
