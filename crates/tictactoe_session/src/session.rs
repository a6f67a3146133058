//! The game session engine.
//!
//! A [`GameSession`] owns one board and walks it through
//! `NotStarted -> InProgress -> {Won, Draw}`. Callers bind two
//! [`PlayerProfile`]s with [`GameSession::start`], feed cell indices to
//! [`GameSession::submit_move`], and read the board back after every call.

use crate::action::Move;
use crate::rules;
use crate::{Board, Mark, PlayerProfile, PlayerSetup, Position, SessionError, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Phase and move results
// ─────────────────────────────────────────────────────────────

/// Lifecycle stage of a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
pub enum Phase {
    /// No players bound yet.
    #[default]
    NotStarted,
    /// Accepting moves.
    InProgress,
    /// A line was completed.
    Won,
    /// Board filled without a line.
    Draw,
}

impl Phase {
    /// True once the match has a terminal outcome.
    pub fn is_finished(self) -> bool {
        matches!(self, Phase::Won | Phase::Draw)
    }
}

/// Why a move was ignored. State is unchanged whenever one of these comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Rejection {
    /// The session is not in progress.
    #[display("No match in progress (phase: {_0})")]
    SessionNotActive(Phase),
    /// The cell already holds a mark.
    #[display("{_0} is already taken by {_1}")]
    CellOccupied(Position, Mark),
}

/// Result of a move submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveResult {
    /// Move accepted; the given mark moves next.
    Continue(Mark),
    /// Move accepted and completed a line for this mark.
    Won(Mark),
    /// Move accepted and filled the board without a line.
    Draw,
    /// Move ignored.
    Rejected(Rejection),
}

impl MoveResult {
    /// True if the move changed the board.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, MoveResult::Rejected(_))
    }

    /// True if the move ended the match.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MoveResult::Won(_) | MoveResult::Draw)
    }
}

// ─────────────────────────────────────────────────────────────
//  Bound players
// ─────────────────────────────────────────────────────────────

/// The two profiles of a match, indexed by mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Players {
    x: PlayerProfile,
    o: PlayerProfile,
}

impl Players {
    /// Returns the profile playing `mark`.
    pub fn get(&self, mark: Mark) -> &PlayerProfile {
        match mark {
            Mark::X => &self.x,
            Mark::O => &self.o,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Session
// ─────────────────────────────────────────────────────────────

/// A single match of tic-tac-toe between two bound players.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    pub(crate) board: Board,
    pub(crate) players: Option<Players>,
    pub(crate) turn: Mark,
    pub(crate) phase: Phase,
    pub(crate) winning_line: Option<[Position; 3]>,
    pub(crate) history: Vec<Move>,
}

impl GameSession {
    /// Creates an unbound session in [`Phase::NotStarted`].
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds two players and starts a clean match with X to move.
    ///
    /// Calling this again, with the same or different players, always
    /// yields a fresh board.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidProfile`] if `player1` does not play X or
    /// `player2` does not play O. The session is left untouched.
    #[instrument(skip(self, player1, player2), fields(p1 = %player1.name(), p2 = %player2.name()))]
    pub fn start(
        &mut self,
        player1: PlayerProfile,
        player2: PlayerProfile,
    ) -> Result<(), SessionError> {
        player1
            .check_seat(Mark::X)
            .inspect_err(|e| warn!(error = %e, "Refusing to start"))?;
        player2
            .check_seat(Mark::O)
            .inspect_err(|e| warn!(error = %e, "Refusing to start"))?;

        self.players = Some(Players {
            x: player1,
            o: player2,
        });
        self.begin_match();
        Ok(())
    }

    /// Builds both profiles from raw setup input and starts.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidProfile`] if either seat has no avatar. Seat 1
    /// is checked first.
    #[instrument(skip(self, player1, player2))]
    pub fn start_with_setup(
        &mut self,
        player1: PlayerSetup,
        player2: PlayerSetup,
    ) -> Result<(), SessionError> {
        let p1 = player1.into_profile(Mark::X)?;
        let p2 = player2.into_profile(Mark::O)?;
        self.start(p1, p2)
    }

    /// Submits a move at `cell` (0-8) for whoever's turn it is.
    ///
    /// # Errors
    ///
    /// [`SessionError::OutOfRange`] for an index outside 0-8. Moves on a
    /// finished or unstarted session, or on an occupied cell, are not
    /// errors; they return [`MoveResult::Rejected`].
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn submit_move(&mut self, cell: usize) -> Result<MoveResult, SessionError> {
        let Some(position) = Position::from_index(cell) else {
            warn!(cell, "Cell index out of range");
            return Err(SessionError::OutOfRange { index: cell });
        };
        Ok(self.play(position))
    }

    /// Places the current mark at `position`.
    #[instrument(skip(self), fields(phase = %self.phase, turn = %self.turn))]
    pub fn play(&mut self, position: Position) -> MoveResult {
        if self.phase != Phase::InProgress {
            warn!(phase = %self.phase, "Ignoring move, no match in progress");
            return MoveResult::Rejected(Rejection::SessionNotActive(self.phase));
        }

        if let Square::Occupied(holder) = self.board.get(position) {
            warn!(%position, %holder, "Ignoring move on occupied cell");
            return MoveResult::Rejected(Rejection::CellOccupied(position, holder));
        }

        let mark = self.turn;
        self.board.set(position, Square::Occupied(mark));
        self.history.push(Move::new(mark, position));

        let result = if let Some(line) = rules::winning_line(&self.board, mark) {
            self.phase = Phase::Won;
            self.winning_line = Some(line);
            info!(%mark, ?line, "Match won");
            MoveResult::Won(mark)
        } else if rules::is_full(&self.board) {
            self.phase = Phase::Draw;
            info!("Match drawn");
            MoveResult::Draw
        } else {
            self.turn = mark.opponent();
            debug!(next = %self.turn, "Turn passes");
            MoveResult::Continue(self.turn)
        };

        #[cfg(debug_assertions)]
        crate::invariants::assert_invariants(self);

        result
    }

    /// Starts a new match with the bound players.
    ///
    /// Without bound players the session returns to
    /// [`Phase::NotStarted`] with an empty board.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn reset(&mut self) {
        if self.players.is_some() {
            self.begin_match();
        } else {
            info!("Reset without players, waiting for start");
            self.clear();
            self.phase = Phase::NotStarted;
        }
    }

    /// Drops the bound players and returns to setup.
    #[instrument(skip(self))]
    pub fn unbind(&mut self) {
        info!("Unbinding players");
        self.players = None;
        self.clear();
        self.phase = Phase::NotStarted;
    }

    /// Profile whose turn it is.
    ///
    /// # Errors
    ///
    /// [`SessionError::SessionNotActive`] unless the match is in progress.
    #[instrument(skip(self))]
    pub fn current_player(&self) -> Result<&PlayerProfile, SessionError> {
        match (&self.players, self.phase) {
            (Some(players), Phase::InProgress) => Ok(players.get(self.turn)),
            _ => Err(SessionError::SessionNotActive { phase: self.phase }),
        }
    }

    /// Profile that completed a line, once the match is won.
    pub fn winner(&self) -> Option<&PlayerProfile> {
        match (&self.players, self.phase) {
            (Some(players), Phase::Won) => Some(players.get(self.turn)),
            _ => None,
        }
    }

    /// Profile playing `mark`, if players are bound.
    pub fn player(&self, mark: Mark) -> Option<&PlayerProfile> {
        self.players.as_ref().map(|p| p.get(mark))
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark to move. Frozen on the winning mark once the match is won.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Returns the phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Cells of the completed line, only when won.
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        self.winning_line
    }

    /// Moves accepted in the current match, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Empty cells, or none when the match is not in progress.
    pub fn valid_moves(&self) -> Vec<Position> {
        if self.phase == Phase::InProgress {
            Position::valid_moves(&self.board)
        } else {
            Vec::new()
        }
    }

    /// Serializable view of everything a presentation layer renders.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cells: (*self.board.squares()).map(Square::mark),
            phase: self.phase,
            turn: (self.phase == Phase::InProgress).then_some(self.turn),
            winner: (self.phase == Phase::Won).then_some(self.turn),
            winning_line: self.winning_line.map(|line| line.map(Position::to_index)),
            draw: self.phase == Phase::Draw,
        }
    }

    fn begin_match(&mut self) {
        self.clear();
        self.phase = Phase::InProgress;
        info!("Match started, X to move");
    }

    fn clear(&mut self) {
        self.board = Board::new();
        self.turn = Mark::X;
        self.winning_line = None;
        self.history.clear();
    }
}

/// Point-in-time view of a session for rendering or serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Cells in row-major order; `None` is empty.
    pub cells: [Option<Mark>; 9],
    /// Current phase.
    pub phase: Phase,
    /// Mark to move, only while in progress.
    pub turn: Option<Mark>,
    /// Winning mark, only when won.
    pub winner: Option<Mark>,
    /// Indices of the winning line, only when won.
    pub winning_line: Option<[usize; 3]>,
    /// True only for a drawn match.
    pub draw: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AvatarRef, ProfileError};

    fn profile(name: &str, mark: Mark) -> PlayerProfile {
        PlayerProfile::create(name, Some(AvatarRef::new("avatar.png")), mark).unwrap()
    }

    fn started() -> GameSession {
        let mut session = GameSession::new();
        session
            .start(profile("Ada", Mark::X), profile("Bo", Mark::O))
            .unwrap();
        session
    }

    #[test]
    fn test_new_session_is_not_started() {
        let session = GameSession::new();
        assert_eq!(session.phase(), Phase::NotStarted);
        assert_eq!(session.board().filled(), 0);
        assert!(session.player(Mark::X).is_none());
    }

    #[test]
    fn test_start_binds_players() {
        let session = started();
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.turn(), Mark::X);
        assert_eq!(session.current_player().unwrap().name(), "Ada");
        assert_eq!(session.player(Mark::O).unwrap().name(), "Bo");
    }

    #[test]
    fn test_start_rejects_swapped_seats() {
        let mut session = GameSession::new();
        let result = session.start(profile("Bo", Mark::O), profile("Ada", Mark::X));
        assert!(matches!(
            result,
            Err(SessionError::InvalidProfile {
                reason: ProfileError::SeatMismatch { seat: 1, .. }
            })
        ));
        assert_eq!(session.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_turn_passes_after_move() {
        let mut session = started();
        assert_eq!(session.submit_move(4), Ok(MoveResult::Continue(Mark::O)));
        assert_eq!(session.current_player().unwrap().name(), "Bo");
        assert_eq!(session.history(), &[Move::new(Mark::X, Position::Center)]);
    }

    #[test]
    fn test_out_of_range_is_error() {
        let mut session = started();
        assert_eq!(
            session.submit_move(9),
            Err(SessionError::OutOfRange { index: 9 })
        );
        assert_eq!(session.board().filled(), 0);
    }

    #[test]
    fn test_out_of_range_checked_before_phase() {
        let mut session = GameSession::new();
        assert_eq!(
            session.submit_move(42),
            Err(SessionError::OutOfRange { index: 42 })
        );
    }

    #[test]
    fn test_move_before_start_is_rejected() {
        let mut session = GameSession::new();
        let before = session.snapshot();
        assert_eq!(
            session.submit_move(0),
            Ok(MoveResult::Rejected(Rejection::SessionNotActive(
                Phase::NotStarted
            )))
        );
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.turn(), Mark::X);
        assert_eq!(session.phase(), Phase::NotStarted);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_current_player_requires_active_match() {
        let session = GameSession::new();
        assert_eq!(
            session.current_player(),
            Err(SessionError::SessionNotActive {
                phase: Phase::NotStarted
            })
        );
    }

    #[test]
    fn test_reset_without_players_stays_not_started() {
        let mut session = GameSession::new();
        session.reset();
        assert_eq!(session.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_unbind_returns_to_setup() {
        let mut session = started();
        session.submit_move(0).unwrap();
        session.unbind();
        assert_eq!(session.phase(), Phase::NotStarted);
        assert!(session.player(Mark::X).is_none());
        assert_eq!(session.board().filled(), 0);

        session.reset();
        assert_eq!(session.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_snapshot_while_in_progress() {
        let mut session = started();
        session.submit_move(0).unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.cells[0], Some(Mark::X));
        assert_eq!(snapshot.turn, Some(Mark::O));
        assert_eq!(snapshot.winner, None);
        assert_eq!(snapshot.winning_line, None);
        assert!(!snapshot.draw);
    }

    #[test]
    fn test_valid_moves_empty_after_finish() {
        let mut session = started();
        for cell in [0, 3, 1, 4, 2] {
            session.submit_move(cell).unwrap();
        }
        assert!(session.valid_moves().is_empty());
        assert_eq!(session.winner().unwrap().name(), "Ada");
    }
}
