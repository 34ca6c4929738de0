use std::time::Duration;

use serde::Serialize;

use crate::{Grid, Piece, PieceKind, SetActivePieceError};

use super::{
    action::{
        Action, ActionOutcome, HardDropOutcome, LockOutcome, LockReport, MoveOutcome,
        RotateOutcome,
    },
    config::{ConfigError, EngineConfig},
    game_stats::GameStats,
    piece_generator::{PieceGenerator, PieceSeed},
    snapshot::GameSnapshot,
};

/// Gravity interval at level 1.
const BASE_GRAVITY_MILLIS: u64 = 700;
/// Interval reduction per level.
const GRAVITY_STEP_MILLIS: u64 = 60;
/// Fastest gravity interval.
const MIN_GRAVITY_MILLIS: u64 = 120;

/// Interval between gravity ticks at the given level:
/// `max(120ms, 700ms - (level - 1) * 60ms)`.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::gravity_interval;
///
/// assert_eq!(gravity_interval(1), Duration::from_millis(700));
/// assert_eq!(gravity_interval(5), Duration::from_millis(460));
/// assert_eq!(gravity_interval(20), Duration::from_millis(120));
/// ```
#[must_use]
pub fn gravity_interval(level: usize) -> Duration {
    let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
    let millis = BASE_GRAVITY_MILLIS.saturating_sub(steps.saturating_mul(GRAVITY_STEP_MILLIS));
    Duration::from_millis(millis.max(MIN_GRAVITY_MILLIS))
}

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    Running,
    Paused,
    GameOver,
}

/// A single game: grid, active and next piece, statistics, and lifecycle state.
///
/// Every action runs to completion before returning; the game holds no timers and
/// performs no I/O. The caller drives gravity by calling [`Game::soft_drop`] (or
/// applying [`Action::SoftDrop`]) every [`Game::gravity_interval`] while the game is
/// running.
///
/// Actions other than [`Game::toggle_pause`] and [`Game::reset`] are ignored while
/// the game is paused or over.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Action, Game, PieceSeed, PlayState};
///
/// let mut game = Game::with_seed(PieceSeed::from_u128(7));
///
/// game.apply(Action::Left);
/// game.apply(Action::Rotate);
/// let outcome = game.hard_drop();
/// assert!(outcome.is_dropped());
///
/// assert_eq!(game.toggle_pause(), PlayState::Paused);
/// assert!(game.soft_drop().is_ignored());
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    active_piece: Option<Piece>,
    next_kind: PieceKind,
    stats: GameStats,
    play_state: PlayState,
    generator: PieceGenerator,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game on the default 10×20 grid with uniform random pieces.
    #[must_use]
    pub fn new() -> Self {
        let config = EngineConfig::default();
        Self::with_grid(
            Grid::new(config.width, config.height),
            PieceGenerator::new(config.randomizer),
        )
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let config = EngineConfig::default();
        Self::with_grid(
            Grid::new(config.width, config.height),
            PieceGenerator::with_seed(config.randomizer, seed),
        )
    }

    /// Creates a game from a validated configuration.
    pub fn with_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator = match config.seed {
            Some(seed) => PieceGenerator::with_seed(config.randomizer, seed),
            None => PieceGenerator::new(config.randomizer),
        };
        Ok(Self::with_grid(Grid::new(config.width, config.height), generator))
    }

    /// Creates a game on an existing grid, e.g. a prepared position.
    ///
    /// If the first piece cannot be placed, the game starts in [`PlayState::GameOver`].
    #[must_use]
    pub fn with_grid(grid: Grid, mut generator: PieceGenerator) -> Self {
        let first = generator.next_kind();
        let next_kind = generator.next_kind();
        let mut game = Self {
            grid,
            active_piece: None,
            next_kind,
            stats: GameStats::new(),
            play_state: PlayState::Running,
            generator,
        };
        game.spawn(first);
        game
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the falling piece, or `None` once the game is over.
    #[must_use]
    pub fn active_piece(&self) -> Option<Piece> {
        self.active_piece
    }

    #[must_use]
    pub fn next_kind(&self) -> PieceKind {
        self.next_kind
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    /// Returns the interval at which the scheduler should issue gravity ticks.
    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        gravity_interval(self.stats.level())
    }

    /// Returns where the active piece would land on a hard drop.
    #[must_use]
    pub fn ghost_piece(&self) -> Option<Piece> {
        self.active_piece.map(|piece| piece.drop_position(&self.grid).0)
    }

    /// Replaces the active piece of a running game if it can be placed.
    ///
    /// Intended for prepared positions in tests and tools. Paused and finished
    /// games are left untouched.
    pub fn set_active_piece(&mut self, piece: Piece) -> Result<(), SetActivePieceError> {
        if !self.play_state.is_running() {
            return Err(SetActivePieceError::NotRunning);
        }
        if !self.grid.can_place(&piece) {
            return Err(SetActivePieceError::Collision);
        }
        self.active_piece = Some(piece);
        Ok(())
    }

    /// Applies a single action and reports what happened.
    pub fn apply(&mut self, action: Action) -> ActionOutcome {
        match action {
            Action::Left => self.try_move(-1, 0).into(),
            Action::Right => self.try_move(1, 0).into(),
            Action::SoftDrop => self.soft_drop().into(),
            Action::Rotate => self.rotate().into(),
            Action::HardDrop => self.hard_drop().into(),
            Action::TogglePause => self.toggle_pause().into(),
            Action::Reset => self.reset().into(),
        }
    }

    /// Moves the active piece by `(dx, dy)`.
    ///
    /// A blocked downward move (`dy == 1`) locks the piece; any other blocked move is
    /// rejected without effect. Deltas must be unit steps (`dx` in `-1..=1`, `dy` in
    /// `0..=1`).
    pub fn try_move(&mut self, dx: i32, dy: i32) -> MoveOutcome {
        debug_assert!(
            (-1..=1).contains(&dx) && (0..=1).contains(&dy),
            "move delta must be a unit step, got ({dx}, {dy})"
        );
        let Some(piece) = self.controllable_piece() else {
            return MoveOutcome::Ignored;
        };

        let candidate = piece.moved(dx, dy);
        if self.grid.can_place(&candidate) {
            self.active_piece = Some(candidate);
            return MoveOutcome::Moved;
        }
        if dy == 1 {
            return self.lock_piece(piece).into();
        }
        MoveOutcome::Blocked
    }

    /// Moves the active piece one row down, locking it if it cannot fall.
    pub fn soft_drop(&mut self) -> MoveOutcome {
        self.try_move(0, 1)
    }

    /// Rotates the active piece clockwise, trying one-column kicks to the right and
    /// then to the left.
    pub fn rotate(&mut self) -> RotateOutcome {
        let Some(piece) = self.controllable_piece() else {
            return RotateOutcome::Ignored;
        };
        match piece.kicked_rotated_right(&self.grid) {
            Some(rotated) => {
                self.active_piece = Some(rotated);
                RotateOutcome::Rotated
            }
            None => RotateOutcome::Rejected,
        }
    }

    /// Drops the active piece to its resting position, awarding 2 points per row,
    /// and locks it.
    pub fn hard_drop(&mut self) -> HardDropOutcome {
        let Some(piece) = self.controllable_piece() else {
            return HardDropOutcome::Ignored;
        };
        let (dropped, cells_dropped) = piece.drop_position(&self.grid);
        self.stats.add_hard_drop(cells_dropped);
        self.active_piece = Some(dropped);
        let lock = self.lock_piece(dropped);
        HardDropOutcome::Dropped {
            cells_dropped,
            lock,
        }
    }

    /// Switches between running and paused. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) -> PlayState {
        self.play_state = match self.play_state {
            PlayState::Running => PlayState::Paused,
            PlayState::Paused => PlayState::Running,
            PlayState::GameOver => PlayState::GameOver,
        };
        self.play_state
    }

    /// Starts a fresh game on an empty grid of the same size.
    ///
    /// The piece generator keeps its state, so the new game draws new pieces.
    pub fn reset(&mut self) -> PlayState {
        self.grid = Grid::new(self.grid.width(), self.grid.height());
        self.stats = GameStats::new();
        self.play_state = PlayState::Running;
        let first = self.generator.next_kind();
        self.next_kind = self.generator.next_kind();
        self.spawn(first);
        self.play_state
    }

    /// Returns a read-only view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(self)
    }

    fn controllable_piece(&self) -> Option<Piece> {
        self.active_piece.filter(|_| self.play_state.is_running())
    }

    /// Makes a fresh piece of `kind` active, or ends the game if it does not fit.
    fn spawn(&mut self, kind: PieceKind) -> bool {
        let piece = Piece::spawn(kind, self.grid.width());
        if self.grid.can_place(&piece) {
            self.active_piece = Some(piece);
            true
        } else {
            self.active_piece = None;
            self.play_state = PlayState::GameOver;
            false
        }
    }

    fn lock_piece(&mut self, piece: Piece) -> LockOutcome {
        self.grid.merge_piece(&piece);
        let cleared_lines = self.grid.clear_completed_rows();
        let points = self.stats.complete_piece_drop(cleared_lines);
        let report = LockReport {
            cleared_lines,
            points,
        };

        let incoming = self.next_kind;
        self.next_kind = self.generator.next_kind();
        if self.spawn(incoming) {
            LockOutcome::Locked(report)
        } else {
            LockOutcome::GameOver(report)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PieceRotation, Randomizer};

    fn seeded_game_on(grid: Grid) -> Game {
        Game::with_grid(
            grid,
            PieceGenerator::with_seed(Randomizer::Uniform, PieceSeed::from_u128(1)),
        )
    }

    fn piece(kind: PieceKind, rotation: u8, x: i32, y: i32) -> Piece {
        Piece::new(kind, PieceRotation::new(rotation), x, y)
    }

    #[test]
    fn test_gravity_interval() {
        assert_eq!(gravity_interval(0), Duration::from_millis(700));
        assert_eq!(gravity_interval(2), Duration::from_millis(640));
        assert_eq!(gravity_interval(10), Duration::from_millis(160));
        assert_eq!(gravity_interval(11), Duration::from_millis(120));
        assert_eq!(gravity_interval(usize::MAX), Duration::from_millis(120));
    }

    #[test]
    fn test_initial_state() {
        let game = Game::with_seed(PieceSeed::from_u128(3));
        assert_eq!(game.play_state(), PlayState::Running);
        let active = game.active_piece().unwrap();
        assert_eq!((active.x(), active.y()), (3, -1));
        assert_eq!(game.stats().score(), 0);
        assert_eq!(game.stats().level(), 1);
        assert_eq!(game.gravity_interval(), Duration::from_millis(700));
    }

    #[test]
    fn test_move_left_until_wall() {
        let mut game = seeded_game_on(Grid::new(10, 20));
        game.set_active_piece(piece(PieceKind::O, 0, 2, 5)).unwrap();
        assert_eq!(game.try_move(-1, 0), MoveOutcome::Moved);
        assert_eq!(game.try_move(-1, 0), MoveOutcome::Moved);
        assert_eq!(game.try_move(-1, 0), MoveOutcome::Blocked);
        assert_eq!(game.active_piece(), Some(piece(PieceKind::O, 0, 0, 5)));
    }

    #[test]
    fn test_blocked_soft_drop_locks() {
        let mut game = seeded_game_on(Grid::new(10, 20));
        game.set_active_piece(piece(PieceKind::O, 0, 0, 18)).unwrap();
        let next = game.next_kind();

        let outcome = game.soft_drop();
        assert_eq!(outcome, MoveOutcome::Locked(LockReport::default()));
        assert_eq!(game.grid().cell(0, 19), Some(crate::Cell::Filled(PieceKind::O)));
        assert_eq!(game.active_piece().map(|p| p.kind()), Some(next));
        assert_eq!(game.stats().completed_pieces(), 1);
    }

    #[test]
    fn test_hard_drop_awards_two_points_per_cell() {
        let mut game = seeded_game_on(Grid::new(10, 20));
        game.set_active_piece(piece(PieceKind::O, 0, 0, 13)).unwrap();
        let outcome = game.hard_drop();
        assert_eq!(
            outcome,
            HardDropOutcome::Dropped {
                cells_dropped: 5,
                lock: LockOutcome::Locked(LockReport::default()),
            }
        );
        assert_eq!(game.stats().score(), 10);
        assert_eq!(game.grid().cell(1, 18), Some(crate::Cell::Filled(PieceKind::O)));
    }

    #[test]
    fn test_hard_drop_clears_lines() {
        let mut rows = vec![".........."; 18];
        rows.extend(["IIIIIIII..", "IIIIIIII.."]);
        let mut game = seeded_game_on(Grid::from_ascii(&rows.join("\n")));
        game.set_active_piece(piece(PieceKind::O, 0, 8, 0)).unwrap();

        let outcome = game.hard_drop();
        assert_eq!(
            outcome,
            HardDropOutcome::Dropped {
                cells_dropped: 18,
                lock: LockOutcome::Locked(LockReport {
                    cleared_lines: 2,
                    points: 300,
                }),
            }
        );
        assert_eq!(game.stats().score(), 36 + 300);
        assert_eq!(game.stats().total_cleared_lines(), 2);
        assert!(game.grid().rows().flatten().all(|cell| cell.is_empty()));
    }

    #[test]
    fn test_rotation_rejected_in_narrow_well() {
        let mut grid = Grid::new(10, 20);
        grid.set_cell(1, 11, crate::Cell::Filled(PieceKind::Z));
        let mut game = seeded_game_on(grid);
        let before = piece(PieceKind::I, 3, -1, 10);
        game.set_active_piece(before).unwrap();

        assert_eq!(game.rotate(), RotateOutcome::Rejected);
        assert_eq!(game.active_piece(), Some(before));
    }

    #[test]
    fn test_rotation_kicks_right() {
        let mut game = seeded_game_on(Grid::new(10, 20));
        game.set_active_piece(piece(PieceKind::I, 3, -1, 10)).unwrap();
        assert_eq!(game.rotate(), RotateOutcome::Rotated);
        assert_eq!(game.active_piece(), Some(piece(PieceKind::I, 0, 0, 10)));
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut rows = vec![".........."; 20];
        rows[1] = "...OOOO...";
        let grid = Grid::from_ascii(&rows.join("\n"));
        let mut game = seeded_game_on(grid);
        let active = game.active_piece().unwrap();
        let expected = game.grid().merged(&active);

        let outcome = game.soft_drop();
        assert!(outcome.is_game_over());
        assert_eq!(game.play_state(), PlayState::GameOver);
        assert_eq!(game.grid(), &expected);
        assert_eq!(game.active_piece(), None);
    }

    #[test]
    fn test_actions_ignored_while_paused() {
        let mut game = Game::with_seed(PieceSeed::from_u128(5));
        let before = game.active_piece();
        assert_eq!(game.toggle_pause(), PlayState::Paused);

        assert_eq!(game.try_move(1, 0), MoveOutcome::Ignored);
        assert_eq!(game.soft_drop(), MoveOutcome::Ignored);
        assert_eq!(game.rotate(), RotateOutcome::Ignored);
        assert_eq!(game.hard_drop(), HardDropOutcome::Ignored);
        assert_eq!(game.active_piece(), before);

        assert_eq!(game.toggle_pause(), PlayState::Running);
        assert_eq!(game.try_move(1, 0), MoveOutcome::Moved);
    }

    #[test]
    fn test_game_over_is_terminal_until_reset() {
        let mut rows = vec![".........."; 20];
        rows[1] = "...OOOO...";
        let mut game = seeded_game_on(Grid::from_ascii(&rows.join("\n")));
        game.hard_drop();
        assert_eq!(game.play_state(), PlayState::GameOver);

        assert_eq!(game.toggle_pause(), PlayState::GameOver);
        assert_eq!(game.soft_drop(), MoveOutcome::Ignored);
        assert_eq!(game.rotate(), RotateOutcome::Ignored);

        assert_eq!(game.reset(), PlayState::Running);
        assert!(game.grid().rows().flatten().all(|cell| cell.is_empty()));
        assert_eq!(game.grid().width(), 10);
        assert!(game.active_piece().is_some());
    }

    #[test]
    fn test_blocked_first_spawn_starts_game_over() {
        let mut rows = vec![".........."; 20];
        rows[0] = "ZZZZZZZZZ.";
        rows[1] = "ZZZZZZZZZ.";
        let game = seeded_game_on(Grid::from_ascii(&rows.join("\n")));
        assert_eq!(game.play_state(), PlayState::GameOver);
        assert_eq!(game.active_piece(), None);
    }

    #[test]
    fn test_set_active_piece_requires_running_game() {
        let mut game = seeded_game_on(Grid::new(10, 20));
        assert_eq!(
            game.set_active_piece(piece(PieceKind::O, 0, 0, 19)),
            Err(SetActivePieceError::Collision)
        );

        game.toggle_pause();
        let before = game.active_piece();
        assert_eq!(
            game.set_active_piece(piece(PieceKind::O, 0, 0, 10)),
            Err(SetActivePieceError::NotRunning)
        );
        assert_eq!(game.active_piece(), before);

        let mut rows = vec![".........."; 20];
        rows[1] = "...OOOO...";
        let mut game = seeded_game_on(Grid::from_ascii(&rows.join("\n")));
        game.hard_drop();
        assert_eq!(game.play_state(), PlayState::GameOver);
        assert_eq!(
            game.set_active_piece(piece(PieceKind::O, 0, 0, 10)),
            Err(SetActivePieceError::NotRunning)
        );
        assert_eq!(game.active_piece(), None);
        let snapshot = game.snapshot();
        assert_eq!(snapshot.active_piece, None);
        let row = snapshot.grid.rows().nth(10).unwrap();
        assert!(row.iter().all(|cell| cell.is_empty()));
    }

    #[test]
    fn test_reset_zeroes_stats() {
        let mut game = Game::with_seed(PieceSeed::from_u128(9));
        game.hard_drop();
        game.hard_drop();
        assert!(game.stats().score() > 0);
        game.toggle_pause();

        assert_eq!(game.apply(Action::Reset), ActionOutcome::State(PlayState::Running));
        assert_eq!(game.stats(), &GameStats::new());
        assert_eq!(game.stats().level(), 1);
    }

    #[test]
    fn test_with_config_validates() {
        let config = EngineConfig {
            width: 2,
            ..EngineConfig::default()
        };
        assert_eq!(Game::with_config(&config).unwrap_err(), ConfigError::Width(2));

        let config = EngineConfig {
            width: 6,
            height: 8,
            seed: Some(PieceSeed::from_u128(11)),
            ..EngineConfig::default()
        };
        let game = Game::with_config(&config).unwrap();
        assert_eq!((game.grid().width(), game.grid().height()), (6, 8));
        assert_eq!(game.active_piece().unwrap().x(), 1);
    }

    #[test]
    fn test_ghost_piece() {
        let mut game = seeded_game_on(Grid::new(10, 20));
        game.set_active_piece(piece(PieceKind::O, 0, 4, 0)).unwrap();
        assert_eq!(game.ghost_piece(), Some(piece(PieceKind::O, 0, 4, 18)));
    }
}
