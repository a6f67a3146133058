//! Drives a session from command-line input and writes what a screen would show.

use crate::avatars::{AvatarCatalog, AvatarError};
use crate::cli::PlayArgs;
use crate::config::AppConfig;
use anyhow::{Context, Result};
use derive_new::new;
use std::io::Write;
use tictactoe_session::{
    AvatarRef, GameSession, Mark, MoveResult, PlayerSetup, Position, SessionError,
};
use tracing::{debug, info, instrument, warn};

/// One accepted or ignored move, as shown to the players.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MoveLine {
    position: Position,
    result: MoveResult,
    status: String,
}

impl std::fmt::Display for MoveLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.result {
            MoveResult::Rejected(reason) => {
                write!(f, "{}: ignored ({})", self.position, reason)
            }
            _ => write!(f, "{}: {}", self.position, self.status),
        }
    }
}

/// Builds both seats' setup input, resolving avatar choices against the
/// catalog. The catalog is only scanned when a choice was given.
#[instrument(skip_all)]
pub fn player_setups(
    config: &AppConfig,
    args: &PlayArgs,
) -> Result<(PlayerSetup, PlayerSetup), AvatarError> {
    let catalog = if args.p1_avatar.is_some() || args.p2_avatar.is_some() {
        Some(AvatarCatalog::scan(
            config.avatar_dir(),
            config.avatar_extensions(),
        )?)
    } else {
        None
    };

    let resolve = |choice: &Option<String>| -> Result<Option<AvatarRef>, AvatarError> {
        match (choice, &catalog) {
            (Some(choice), Some(catalog)) => catalog.resolve(choice).map(Some),
            _ => Ok(None),
        }
    };

    let p1 = PlayerSetup::new(args.p1_name.clone(), resolve(&args.p1_avatar)?);
    let p2 = PlayerSetup::new(args.p2_name.clone(), resolve(&args.p2_avatar)?);
    Ok((p1, p2))
}

/// Submits each cell in order and describes what happened.
///
/// Cells after the end of the match are still submitted and come back as
/// ignored.
///
/// # Errors
///
/// [`SessionError::OutOfRange`] on the first cell outside 0-8.
#[instrument(skip(session))]
pub fn play_cells(session: &mut GameSession, cells: &[usize]) -> Result<Vec<MoveLine>, SessionError> {
    let mut lines = Vec::with_capacity(cells.len());
    for &cell in cells {
        let Some(position) = Position::from_index(cell) else {
            warn!(cell, "Move list holds a cell outside the board");
            return Err(SessionError::OutOfRange { index: cell });
        };
        let result = session.play(position);
        if let MoveResult::Rejected(reason) = result {
            debug!(cell, %reason, "Reporting ignored move");
        }
        let status = session
            .status_line()
            .map(|s| s.to_string())
            .unwrap_or_default();
        lines.push(MoveLine::new(position, result, status));
    }
    Ok(lines)
}

/// Sets up both players, plays the match (and optional rematch) and writes
/// the transcript to `out`.
#[instrument(skip_all)]
pub fn run(config: &AppConfig, args: &PlayArgs, out: &mut impl Write) -> Result<()> {
    let (p1, p2) = player_setups(config, args).context("Could not resolve avatar choices")?;

    let mut session = GameSession::new();
    session
        .start_with_setup(p1, p2)
        .context("Both players need a name and an avatar before the match can start")?;
    write_players(&session, out)?;

    let json = args.json || *config.json_output();
    play_and_report(&mut session, &args.moves, json, out)?;

    if !args.rematch.is_empty() {
        info!("Starting rematch");
        session.reset();
        writeln!(out, "-- rematch --")?;
        play_and_report(&mut session, &args.rematch, json, out)?;
    }

    Ok(())
}

fn write_players(session: &GameSession, out: &mut impl Write) -> Result<()> {
    for mark in [Mark::X, Mark::O] {
        if let Some(player) = session.player(mark) {
            writeln!(out, "{} plays {} ({})", player.name(), mark, player.avatar())?;
        }
    }
    Ok(())
}

fn play_and_report(
    session: &mut GameSession,
    cells: &[usize],
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    if let Some(status) = session.status_line() {
        writeln!(out, "{}", status)?;
    }

    let lines = play_cells(session, cells).context("Invalid move list")?;
    for line in &lines {
        writeln!(out, "{}", line)?;
    }

    if json {
        let snapshot = serde_json::to_string_pretty(&session.snapshot())?;
        writeln!(out, "{}", snapshot)?;
    } else {
        writeln!(out, "{}", session.board().display())?;
    }
    Ok(())
}
