//! Error types for profiles and sessions.

use crate::{Mark, Phase};
use derive_more::{Display, Error};

/// Why a player profile cannot take part in a match.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ProfileError {
    /// No avatar was chosen for the seat.
    #[display("Invalid profile: player {seat} has not chosen an avatar")]
    MissingAvatar {
        /// Seat number (1 or 2).
        seat: u8,
    },

    /// A profile was bound to the wrong seat.
    #[display("Invalid profile: player {seat} must play {expected}, not {found}")]
    SeatMismatch {
        /// Seat number (1 or 2).
        seat: u8,
        /// Mark the seat requires.
        expected: Mark,
        /// Mark the profile carries.
        found: Mark,
    },
}

/// Hard failures reported by [`GameSession`](crate::GameSession).
///
/// Clicks on an occupied cell or a finished board are not errors; they come
/// back as [`MoveResult::Rejected`](crate::MoveResult::Rejected).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// Cell index outside 0-8.
    #[display("Cell index {index} is out of range (must be 0-8)")]
    OutOfRange {
        /// The offending index.
        index: usize,
    },

    /// Operation needs a match in progress.
    #[display("No match in progress (phase: {phase})")]
    SessionNotActive {
        /// Phase at the time of the call.
        phase: Phase,
    },

    /// A profile failed validation at start.
    #[display("{reason}")]
    InvalidProfile {
        /// What was wrong with the profile.
        #[error(source)]
        reason: ProfileError,
    },
}

impl From<ProfileError> for SessionError {
    fn from(reason: ProfileError) -> Self {
        Self::InvalidProfile { reason }
    }
}
