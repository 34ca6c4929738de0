use serde::Serialize;

/// Score values for line clears.
///
/// Index corresponds to number of lines cleared simultaneously; four or more
/// lines share the last entry.
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Points awarded per cell travelled by a hard drop.
pub const HARD_DROP_POINTS_PER_CELL: usize = 2;

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: usize = 10;

/// Base points for clearing `lines` rows with one lock, before the level multiplier.
///
/// # Example
///
/// ```
/// use blockfall_engine::points_for_lines;
///
/// assert_eq!(points_for_lines(0), 0);
/// assert_eq!(points_for_lines(2), 300);
/// assert_eq!(points_for_lines(6), 800);
/// ```
#[must_use]
pub fn points_for_lines(lines: usize) -> usize {
    SCORE_TABLE[lines.min(SCORE_TABLE.len() - 1)]
}

/// Level reached after clearing `total_lines` lines: one level per 10 lines,
/// starting at 1.
#[must_use]
pub const fn level_for_lines(total_lines: usize) -> usize {
    total_lines / LINES_PER_LEVEL + 1
}

/// Game statistics tracking score, lines cleared, and piece count.
///
/// - **Score**: line clear points (multiplied by level) plus hard drop bonuses
/// - **Level**: derived from total lines cleared
/// - **Completed pieces**: total number of pieces locked
/// - **Line clear distribution**: count of locks by number of lines cleared
///
/// Scoring is deliberately simple: no combo, back-to-back or T-spin bonuses.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// assert_eq!(stats.complete_piece_drop(4), 800);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level: `total_cleared_lines / 10 + 1`.
    #[must_use]
    pub const fn level(&self) -> usize {
        level_for_lines(self.total_cleared_lines)
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by lines cleared.
    ///
    /// - `[0]`: locks that cleared nothing
    /// - `[1]`..`[3]`: singles, doubles, triples
    /// - `[4]`: four or more lines
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Adds the hard drop bonus for `cells` rows travelled and returns it.
    pub fn add_hard_drop(&mut self, cells: usize) -> usize {
        let points = cells * HARD_DROP_POINTS_PER_CELL;
        self.score += points;
        points
    }

    /// Updates statistics after a piece lock and returns the points awarded.
    ///
    /// The line clear points are multiplied by the level in effect before this
    /// lock's lines are counted.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        let points = points_for_lines(cleared_lines) * self.level();
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        self.line_cleared_counter[cleared_lines.min(4)] += 1;
        self.score += points;
        points
    }
}
