//! Tic-tac-toe session engine.
//!
//! A presentation-agnostic state machine for one match between two named
//! players. The caller owns a [`GameSession`], binds two [`PlayerProfile`]s,
//! submits cell indices and reads the board back.
//!
//! # Example
//!
//! ```
//! use tictactoe_session::{AvatarRef, GameSession, Mark, MoveResult, PlayerProfile};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ada = PlayerProfile::create("Ada", Some(AvatarRef::new("fox.png")), Mark::X)?;
//! let bo = PlayerProfile::create("Bo", Some(AvatarRef::new("owl.png")), Mark::O)?;
//!
//! let mut session = GameSession::new();
//! session.start(ada, bo)?;
//!
//! let mut last = MoveResult::Draw;
//! for cell in [0, 3, 1, 4, 2] {
//!     last = session.submit_move(cell)?;
//! }
//! assert_eq!(last, MoveResult::Won(Mark::X));
//! assert_eq!(session.status_line().unwrap().to_string(), "Ada wins!");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod error;
pub mod invariants;
mod profile;
pub mod rules;
mod session;
mod status;
mod types;

pub use action::Move;
pub use error::{ProfileError, SessionError};
pub use profile::{AvatarRef, PlayerProfile, PlayerSetup};
pub use session::{GameSession, MoveResult, Phase, Players, Rejection, SessionSnapshot};
pub use status::StatusLine;
pub use types::{Board, Mark, Position, Square};
