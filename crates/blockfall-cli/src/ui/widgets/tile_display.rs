use blockfall_engine::{Cell, PieceKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::style;

/// What a single grid position shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Ghost(PieceKind),
    Block(PieceKind),
}

impl From<Cell> for Tile {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Tile::Empty,
            Cell::Filled(kind) => Tile::Block(kind),
        }
    }
}

/// One tile, two terminal columns wide.
#[derive(Debug)]
pub struct TileDisplay {
    style: Style,
    symbol: &'static str,
}

impl TileDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub fn new(tile: Tile, show_dots: bool) -> Self {
        let (style, symbol) = match tile {
            Tile::Empty if show_dots => (style::EMPTY_DOT, "."),
            Tile::Empty => (style::EMPTY, ""),
            Tile::Ghost(kind) => (style::ghost(kind), "[]"),
            Tile::Block(kind) => (style::piece(kind), ""),
        };
        Self { style, symbol }
    }
}

impl Widget for &TileDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
