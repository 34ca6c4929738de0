use serde::{Deserialize, Serialize};

/// A discrete player or scheduler request.
///
/// Input translators turn raw device events into these; the gravity scheduler
/// issues [`Action::SoftDrop`] on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Left,
    Right,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    Reset,
}

/// Result of a line-clearing lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LockReport {
    /// Rows removed by this lock.
    pub cleared_lines: usize,
    /// Line clear points awarded (after the level multiplier).
    pub points: usize,
}

/// Outcome of the lock sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LockOutcome {
    /// The piece locked and the next piece spawned.
    Locked(LockReport),
    /// The piece locked but the next piece could not be placed.
    GameOver(LockReport),
}

impl LockOutcome {
    #[must_use]
    pub fn report(&self) -> LockReport {
        match self {
            LockOutcome::Locked(report) | LockOutcome::GameOver(report) => *report,
        }
    }
}

impl From<LockOutcome> for MoveOutcome {
    fn from(outcome: LockOutcome) -> Self {
        match outcome {
            LockOutcome::Locked(report) => MoveOutcome::Locked(report),
            LockOutcome::GameOver(report) => MoveOutcome::GameOver(report),
        }
    }
}

/// Outcome of [`Game::try_move`](crate::Game::try_move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The active piece moved.
    Moved,
    /// The move was rejected; nothing changed.
    Blocked,
    /// A blocked downward move locked the piece.
    Locked(LockReport),
    /// A blocked downward move locked the piece and the game ended.
    GameOver(LockReport),
    /// The game is paused or over.
    Ignored,
}

/// Outcome of [`Game::rotate`](crate::Game::rotate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum RotateOutcome {
    Rotated,
    /// No kick candidate was placeable; the piece is unchanged.
    Rejected,
    /// The game is paused or over.
    Ignored,
}

/// Outcome of [`Game::hard_drop`](crate::Game::hard_drop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HardDropOutcome {
    Dropped {
        cells_dropped: usize,
        lock: LockOutcome,
    },
    /// The game is paused or over.
    Ignored,
}

/// Outcome of [`Game::apply`](crate::Game::apply), one variant per action family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::From)]
#[serde(untagged)]
pub enum ActionOutcome {
    Move(MoveOutcome),
    Rotate(RotateOutcome),
    HardDrop(HardDropOutcome),
    State(super::game::PlayState),
}

impl ActionOutcome {
    /// Returns the lock outcome if this action locked a piece.
    #[must_use]
    pub fn lock(&self) -> Option<LockOutcome> {
        match *self {
            ActionOutcome::Move(MoveOutcome::Locked(report)) => Some(LockOutcome::Locked(report)),
            ActionOutcome::Move(MoveOutcome::GameOver(report)) => {
                Some(LockOutcome::GameOver(report))
            }
            ActionOutcome::HardDrop(HardDropOutcome::Dropped { lock, .. }) => Some(lock),
            _ => None,
        }
    }
}
