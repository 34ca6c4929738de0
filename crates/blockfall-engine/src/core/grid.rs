use std::fmt;

use serde::{Deserialize, Serialize};

use super::{piece::Piece, shape::PieceKind};

/// A single cell of the grid.
///
/// A filled cell is tagged with the kind of the piece that was locked there, which
/// in turn determines its display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Locked block of a specific piece kind.
    Filled(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        !self.is_empty()
    }

    /// `.` for empty cells, the piece kind code otherwise.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Filled(kind) => kind.as_char(),
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            _ => match PieceKind::from_char(c) {
                Some(kind) => Some(Cell::Filled(kind)),
                None => None,
            },
        }
    }
}

/// Fixed-size playing field.
///
/// Cells are stored row-major, row 0 at the top. The dimensions are chosen at
/// creation and never change: merging pieces and clearing rows only rewrite cell
/// contents.
///
/// Pieces may protrude above the grid (`y < 0`). Such cells are never stored; they
/// are only constrained by the side walls when testing placement.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, Piece, PieceKind};
///
/// let mut grid = Grid::from_ascii(
///     "
///     ...
///     III
///     O.I
///     ",
/// );
/// assert_eq!(grid.clear_completed_rows(), 1);
/// assert_eq!(grid.to_string(), "...\n...\nO.I\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: ["..........", "...TTT....", ...] (one string per row, top to bottom)
        serializer.collect_seq(
            self.rows()
                .map(|row| row.iter().map(|cell| cell.as_char()).collect::<String>()),
        )
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let rows = Vec::<String>::deserialize(deserializer)?;
        let Some(width) = rows.first().map(|row| row.chars().count()) else {
            return Err(D::Error::custom("grid must have at least one row"));
        };
        if width == 0 {
            return Err(D::Error::custom("grid must have at least one column"));
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(D::Error::custom(format!(
                    "expected {width} cells at row {y}, got {len}"
                )));
            }
            for c in row.chars() {
                let cell = Cell::from_char(c).ok_or_else(|| {
                    D::Error::custom(format!("invalid cell at row {y}: {c:?}"))
                })?;
                cells.push(cell);
            }
        }

        Ok(Grid {
            width,
            height: rows.len(),
            cells,
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Grid {
    /// Creates an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    /// Overwrites a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of grid");
        self.cells[y * self.width + x] = cell;
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Checks if every occupied cell of the piece is free and inside the walls.
    ///
    /// A cell blocks placement if it is left of column 0, right of the last column,
    /// below the last row, or (for visible rows) already filled. Cells above the grid
    /// (`y < 0`) are allowed.
    #[must_use]
    pub fn can_place(&self, piece: &Piece) -> bool {
        piece
            .occupied_cells()
            .into_iter()
            .all(|(x, y)| self.is_free(x, y))
    }

    fn is_free(&self, x: i32, y: i32) -> bool {
        let Some(x) = usize::try_from(x).ok().filter(|x| *x < self.width) else {
            return false;
        };
        match usize::try_from(y) {
            Err(_) => true,
            Ok(y) => self.cell(x, y).is_some_and(Cell::is_empty),
        }
    }

    /// Stamps the piece's cells into the grid with the piece's kind.
    ///
    /// Cells outside the visible grid are dropped, so a piece locked entirely above
    /// row 0 leaves the grid unchanged.
    pub fn merge_piece(&mut self, piece: &Piece) {
        self.fill_piece_as(piece, Cell::Filled(piece.kind()));
    }

    /// Like [`Self::merge_piece`], but returns a new grid and leaves `self` untouched.
    #[must_use]
    pub fn merged(&self, piece: &Piece) -> Self {
        let mut grid = self.clone();
        grid.merge_piece(piece);
        grid
    }

    fn fill_piece_as(&mut self, piece: &Piece, cell: Cell) {
        for (x, y) in piece.occupied_cells() {
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
                && x < self.width
                && y < self.height
            {
                self.cells[y * self.width + x] = cell;
            }
        }
    }

    /// Removes every completely filled row and returns the number removed.
    ///
    /// Surviving rows shift down and keep their relative order; the same number of
    /// empty rows are inserted at the top.
    pub fn clear_completed_rows(&mut self) -> usize {
        let width = self.width;
        let mut count = 0;
        for y in (0..self.height).rev() {
            let row = y * width..(y + 1) * width;
            if self.cells[row.clone()].iter().all(|cell| cell.is_filled()) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.cells.copy_within(row, (y + count) * width);
            }
        }
        self.cells[..count * width].fill(Cell::Empty);
        count
    }

    /// Creates a `Grid` from ASCII art, mainly for tests.
    ///
    /// `.` is an empty cell and a piece kind code (`I O T S Z J L`) is a filled cell.
    /// Blank lines and surrounding whitespace are ignored; rows are given top to bottom
    /// and the width is taken from the first row.
    ///
    /// # Panics
    ///
    /// Panics on unknown characters or rows of differing widths.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(!lines.is_empty(), "ASCII grid must have at least one row");

        let width = lines[0].chars().count();
        let mut grid = Self::new(width, lines.len());
        for (y, line) in lines.iter().enumerate() {
            assert_eq!(
                line.chars().count(),
                width,
                "Each row must have exactly {width} cells, got {line:?} at row {y}"
            );
            for (x, c) in line.chars().enumerate() {
                let cell = Cell::from_char(c)
                    .unwrap_or_else(|| panic!("invalid cell {c:?} at ({x}, {y})"));
                grid.set_cell(x, y, cell);
            }
        }
        grid
    }
}
