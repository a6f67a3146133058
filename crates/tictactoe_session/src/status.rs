//! Status text for the line above the board.

use crate::{GameSession, Phase};
use serde::Serialize;
use tracing::instrument;

/// What the status line should say about a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display)]
pub enum StatusLine {
    /// Waiting on a player.
    #[display("{name}'s turn")]
    Turn {
        /// Name of the player to move.
        name: String,
    },
    /// A player completed a line.
    #[display("{name} wins!")]
    Won {
        /// Name of the winner.
        name: String,
    },
    /// Board filled without a line.
    #[display("It's a draw!")]
    Draw,
}

impl GameSession {
    /// Status text for the session, or `None` before players are bound.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn status_line(&self) -> Option<StatusLine> {
        let player = self.player(self.turn())?;
        let name = player.name().clone();
        match self.phase() {
            Phase::NotStarted => None,
            Phase::InProgress => Some(StatusLine::Turn { name }),
            Phase::Won => Some(StatusLine::Won { name }),
            Phase::Draw => Some(StatusLine::Draw),
        }
    }
}
