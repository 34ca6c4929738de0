use blockfall_engine::{Game, PlayState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, PieceDisplay, StatsDisplay, color, style};

/// Full game view: stats on the left, board in the middle, next piece on the right,
/// and a popup while paused or after game over.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    game: &'a Game,
}

impl<'a> GameDisplay<'a> {
    pub fn new(game: &'a Game) -> Self {
        Self { game }
    }
}

fn panel(title: &str, border_color: ratatui::style::Color) -> Block<'_> {
    Block::bordered()
        .title(Line::from(title).centered())
        .padding(Padding::horizontal(1))
        .border_style(border_color)
        .style(style::DEFAULT)
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.game.snapshot();
        let border_color = match snapshot.state {
            PlayState::Running => color::WHITE,
            PlayState::Paused => color::YELLOW,
            PlayState::GameOver => color::RED,
        };

        let board = BoardDisplay::new(&snapshot.grid)
            .ghost(snapshot.ghost_piece)
            .block(
                Block::bordered()
                    .border_style(border_color)
                    .style(style::DEFAULT),
            );
        let next = PieceDisplay::new(Some(snapshot.next_kind)).block(panel("NEXT", border_color));
        let stats = StatsDisplay::new(self.game.stats()).block(panel("STATS", border_color));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board.width()),
            Constraint::Length(next.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next.height())]).areas(right_column);

        let board_width = board.width();
        stats.render(stats_area, buf);
        board.render(board_area, buf);
        next.render(next_area, buf);

        let popup = match snapshot.state {
            PlayState::Running => None,
            PlayState::Paused => Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW))),
            PlayState::GameOver => Some((
                "GAME OVER - press R",
                Style::new().fg(color::WHITE).bg(color::RED),
            )),
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
