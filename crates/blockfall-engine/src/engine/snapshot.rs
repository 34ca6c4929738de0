use std::fmt;

use serde::Serialize;

use crate::{Grid, Piece, PieceKind};

use super::game::{Game, PlayState};

/// Read-only view of a [`Game`] for renderers and the headless simulator.
///
/// `grid` already has the active piece stamped in; `active_piece` and `ghost_piece`
/// are provided separately so a renderer can style them differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub active_piece: Option<Piece>,
    pub ghost_piece: Option<Piece>,
    pub next_kind: PieceKind,
    pub score: usize,
    pub lines: usize,
    pub level: usize,
    pub state: PlayState,
    /// `true` only while the game is neither paused nor over.
    pub running: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub(crate) fn new(game: &Game) -> Self {
        let active_piece = game.active_piece();
        let grid = match &active_piece {
            Some(piece) => game.grid().merged(piece),
            None => game.grid().clone(),
        };
        let stats = game.stats();
        let state = game.play_state();
        Self {
            grid,
            active_piece,
            ghost_piece: game.ghost_piece(),
            next_kind: game.next_kind(),
            score: stats.score(),
            lines: stats.total_cleared_lines(),
            level: stats.level(),
            state,
            running: state.is_running(),
            game_over: state.is_game_over(),
        }
    }
}

impl fmt::Display for GameSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)?;
        let state = match self.state {
            PlayState::Running => "running",
            PlayState::Paused => "paused",
            PlayState::GameOver => "game over",
        };
        writeln!(
            f,
            "score: {}  lines: {}  level: {}  next: {}  state: {state}",
            self.score,
            self.lines,
            self.level,
            self.next_kind.as_char(),
        )
    }
}
