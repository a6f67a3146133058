//! Outcome consistency invariant: the phase agrees with the board.

use super::Invariant;
use crate::rules::{check_winner, is_full};
use crate::{GameSession, Phase, Square};

/// Invariant: `Won` exactly when a winning line is recorded and held by the
/// winner, `Draw` only on a full board without any line, and an in-progress
/// board has neither.
pub struct OutcomeConsistentInvariant;

impl Invariant<GameSession> for OutcomeConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        let board = session.board();
        match (session.phase(), session.winning_line()) {
            (Phase::Won, Some(line)) => line
                .iter()
                .all(|&pos| board.get(pos) == Square::Occupied(session.turn())),
            (Phase::Draw, None) => is_full(board) && check_winner(board).is_none(),
            (Phase::InProgress, None) => check_winner(board).is_none() && !is_full(board),
            (Phase::NotStarted, None) => board.filled() == 0,
            _ => false,
        }
    }

    fn description() -> &'static str {
        "Phase and winning line agree with the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Position};

    #[test]
    fn test_line_without_win_violates() {
        let mut session = GameSession::new();
        session.phase = Phase::InProgress;
        for pos in [Position::TopLeft, Position::TopCenter, Position::TopRight] {
            session.board.set(pos, Square::Occupied(Mark::X));
        }
        assert!(!OutcomeConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_won_without_line_violates() {
        let mut session = GameSession::new();
        session.phase = Phase::Won;
        assert!(!OutcomeConsistentInvariant::holds(&session));
    }
}
