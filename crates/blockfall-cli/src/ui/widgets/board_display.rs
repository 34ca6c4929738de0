use std::iter;

use blockfall_engine::{Grid, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::{Tile, TileDisplay};

/// The playfield: locked cells, the active piece and its landing preview.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    ghost: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    /// `grid` is expected to have the active piece already stamped in.
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            ghost: None,
            block: None,
        }
    }

    pub fn ghost(self, ghost: Option<Piece>) -> Self {
        Self { ghost, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        cells_to_u16(self.grid.width()).saturating_mul(TileDisplay::WIDTH)
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        cells_to_u16(self.grid.height()).saturating_mul(TileDisplay::HEIGHT)
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn tiles(&self) -> Vec<Vec<Tile>> {
        let mut tiles: Vec<Vec<Tile>> = self
            .grid
            .rows()
            .map(|row| row.iter().copied().map(Tile::from).collect())
            .collect();
        if let Some(ghost) = self.ghost {
            for (x, y) in ghost.occupied_cells() {
                if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
                    && let Some(tile) = tiles.get_mut(y).and_then(|row| row.get_mut(x))
                    && *tile == Tile::Empty
                {
                    *tile = Tile::Ghost(ghost.kind());
                }
            }
        }
        tiles
    }
}

fn cells_to_u16(cells: usize) -> u16 {
    u16::try_from(cells).unwrap_or(u16::MAX)
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.grid.width()).map(|_| Constraint::Length(TileDisplay::WIDTH));
        let row_constraints =
            (0..self.grid.height()).map(|_| Constraint::Length(TileDisplay::HEIGHT));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.tiles()) {
            for (grid_cell, tile) in iter::zip(grid_row, row) {
                TileDisplay::new(tile, true).render(grid_cell, buf);
            }
        }
    }
}
