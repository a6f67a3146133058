//! Win detection logic for tic-tac-toe.

use crate::{Board, Mark, Position, Square};
use strum::IntoEnumIterator;
use tracing::instrument;

/// The 8 winning lines: rows, columns, then diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the first line fully held by `mark`, if any.
///
/// Only the mover's mark needs checking after a move, since no other
/// square changed.
#[instrument(skip(board))]
pub fn winning_line(board: &Board, mark: Mark) -> Option<[Position; 3]> {
    LINES
        .into_iter()
        .find(|line| line.iter().all(|&pos| board.get(pos) == Square::Occupied(mark)))
}

/// Returns the mark holding a complete line, if any.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    Mark::iter().find(|&mark| winning_line(board, mark).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_every_line_is_detected() {
        for line in LINES {
            let mut board = Board::new();
            for pos in line {
                board.set(pos, Square::Occupied(Mark::O));
            }
            assert_eq!(winning_line(&board, Mark::O), Some(line));
            assert_eq!(winning_line(&board, Mark::X), None);
            assert_eq!(check_winner(&board), Some(Mark::O));
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Mark::X));
        board.set(Position::TopCenter, Square::Occupied(Mark::O));
        board.set(Position::TopRight, Square::Occupied(Mark::X));
        assert_eq!(check_winner(&board), None);
    }
}
