//! History consistency invariant: replaying the history rebuilds the board.

use super::Invariant;
use crate::{Board, GameSession, Square};

/// Invariant: the board is exactly the history replayed onto an empty board,
/// with every move landing on an empty square.
///
/// This covers both "one filled square per accepted move" and "squares are
/// never overwritten".
pub struct HistoryConsistentInvariant;

impl Invariant<GameSession> for HistoryConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        let mut replayed = Board::new();
        for mv in session.history() {
            if !replayed.is_empty(mv.position) {
                return false;
            }
            replayed.set(mv.position, Square::Occupied(mv.mark));
        }
        replayed == *session.board()
    }

    fn description() -> &'static str {
        "Board matches the move history and squares are never overwritten"
    }
}
