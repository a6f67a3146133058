//! Draw detection logic for tic-tac-toe.

use super::win::check_winner;
use crate::Board;
use tracing::instrument;

/// Checks if every square is occupied.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.filled() == board.squares().len()
}

/// A draw is a full board with no completed line.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}
