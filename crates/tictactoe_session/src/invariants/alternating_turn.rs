//! Alternating turn invariant: marks alternate X, O, X, O, ...

use super::Invariant;
use crate::{GameSession, Mark, Phase};

/// Invariant: marks alternate, X first, and the turn points at the next mover.
///
/// Once the match is over the turn stays on the mark that moved last.
pub struct AlternatingTurnInvariant;

impl Invariant<GameSession> for AlternatingTurnInvariant {
    fn holds(session: &GameSession) -> bool {
        let history = session.history();

        let alternates = history
            .iter()
            .enumerate()
            .all(|(i, mv)| mv.mark == if i % 2 == 0 { Mark::X } else { Mark::O });
        if !alternates {
            return false;
        }

        let expected = match (session.phase(), history.last()) {
            (Phase::Won | Phase::Draw, Some(last)) => last.mark,
            (_, Some(last)) => last.mark.opponent(),
            (_, None) => Mark::X,
        };
        session.turn() == expected
    }

    fn description() -> &'static str {
        "Marks alternate X, O, X, ... and the turn follows the last move"
    }
}
