use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, game_display::*, key_binding_display::*, piece_display::*,
    stats_display::*, tile_display::*,
};

mod board_display;
mod game_display;
mod key_binding_display;
mod piece_display;
mod stats_display;
mod tile_display;

mod color {
    use ratatui::style::Color;

    pub const YELLOW: Color = Color::Rgb(0xfa, 0xcc, 0x15);
    pub const RED: Color = Color::Rgb(0xf4, 0x3f, 0x5e);
    pub const GRAY: Color = Color::Rgb(0x47, 0x55, 0x69);
    pub const BLACK: Color = Color::Rgb(0x0f, 0x17, 0x2a);
    pub const WHITE: Color = Color::Rgb(0xf8, 0xfa, 0xfc);
}

pub mod style {
    use blockfall_engine::PieceKind;
    use ratatui::style::{Color, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);

    /// Solid block in the piece kind's color.
    pub const fn piece(kind: PieceKind) -> Style {
        bg_only(piece_color(kind))
    }

    /// Outline in the piece kind's color, for the landing preview.
    pub const fn ghost(kind: PieceKind) -> Style {
        fg_bg(piece_color(kind), color::BLACK)
    }

    const fn piece_color(kind: PieceKind) -> Color {
        let c = kind.color();
        Color::Rgb(c.r, c.g, c.b)
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
