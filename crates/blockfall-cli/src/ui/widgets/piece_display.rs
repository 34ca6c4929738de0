use blockfall_engine::{PieceKind, PieceRotation};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::{Tile, TileDisplay};

/// Preview of a piece kind in its spawn orientation.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new(piece: Option<PieceKind>) -> Self {
        Self { piece, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * TileDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * TileDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(kind) = self.piece else {
            return;
        };
        let shape = kind.shape(PieceRotation::default());
        let (width, height) = shape.extent();
        // Skip empty leading rows (the I-piece sits on its second row).
        let top = shape.cells().map(|(_, y)| y).min().unwrap_or(0);
        let height = height - top;

        let piece_area = area.centered(
            Constraint::Length(u16::from(width) * TileDisplay::WIDTH),
            Constraint::Length(u16::from(height) * TileDisplay::HEIGHT),
        );
        let horizontal = Layout::horizontal(
            (0..width).map(|_| Constraint::Length(TileDisplay::WIDTH)),
        )
        .flex(Flex::Center);
        let vertical =
            Layout::vertical((0..height).map(|_| Constraint::Length(TileDisplay::HEIGHT)));

        let empty = TileDisplay::new(Tile::Empty, false);
        let occupied = TileDisplay::new(Tile::Block(kind), false);
        for (y, row) in piece_area.layout_vec(&vertical).into_iter().enumerate() {
            for (x, cell) in row.layout_vec(&horizontal).into_iter().enumerate() {
                let tile = if shape.is_occupied(x, y + usize::from(top)) {
                    &occupied
                } else {
                    &empty
                };
                tile.render(cell, buf);
            }
        }
    }
}
