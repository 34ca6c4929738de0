use std::time::Duration;

use blockfall_engine::{Game, PlayState};
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use super::input::{self, Command};
use crate::{
    tui::{App, RenderMode, Runtime},
    ui::widgets::{GameDisplay, KeyBinding, KeyBindingDisplay},
};

const FPS: f64 = 60.0;

const RUNNING_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["P"], "Pause"),
    (&["R"], "Restart"),
    (&["Q"], "Quit"),
];
const PAUSED_BINDINGS: &[KeyBinding] = &[(&["P"], "Resume"), (&["R"], "Restart"), (&["Q"], "Quit")];
const GAME_OVER_BINDINGS: &[KeyBinding] = &[(&["R"], "New Game"), (&["Q"], "Quit")];

/// Interactive game: translates key presses into actions and drives gravity.
#[derive(Debug)]
pub(crate) struct PlayApp {
    game: Game,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(game: Game) -> Self {
        Self {
            game,
            is_exiting: false,
        }
    }

    pub(crate) fn game(&self) -> &Game {
        &self.game
    }

    /// Gravity runs at the current level's interval while the game is running and is
    /// suspended otherwise.
    fn gravity_interval(&self) -> Option<Duration> {
        self.game
            .play_state()
            .is_running()
            .then(|| self.game.gravity_interval())
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Game(action) => _ = self.game.apply(action),
            Command::Quit => self.is_exiting = true,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
        runtime.set_tick_interval(self.gravity_interval());
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) {
        if let Some(command) = input::translate(event) {
            self.handle_command(command);
        }
        runtime.set_tick_interval(self.gravity_interval());
    }

    fn draw(&self, frame: &mut Frame) {
        let bindings = match self.game.play_state() {
            PlayState::Running => RUNNING_BINDINGS,
            PlayState::Paused => PAUSED_BINDINGS,
            PlayState::GameOver => GAME_OVER_BINDINGS,
        };
        let [main_area, help_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(GameDisplay::new(&self.game), main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    fn update(&mut self, runtime: &mut Runtime) {
        self.game.soft_drop();
        runtime.set_tick_interval(self.gravity_interval());
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Action, PieceSeed};

    use super::*;

    fn app() -> PlayApp {
        PlayApp::new(Game::with_seed(PieceSeed::from_u128(4)))
    }

    #[test]
    fn test_gravity_suspended_while_paused() {
        let mut app = app();
        assert_eq!(app.gravity_interval(), Some(Duration::from_millis(700)));

        app.handle_command(Command::Game(Action::TogglePause));
        assert_eq!(app.gravity_interval(), None);

        app.handle_command(Command::Game(Action::TogglePause));
        assert_eq!(app.gravity_interval(), Some(Duration::from_millis(700)));
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(!app.should_exit());
        app.handle_command(Command::Quit);
        assert!(app.should_exit());
    }

    #[test]
    fn test_tick_moves_piece_down() {
        let mut app = app();
        let mut runtime = Runtime::new();
        let before = app.game().active_piece().unwrap();
        app.update(&mut runtime);
        assert_eq!(app.game().active_piece().unwrap().y(), before.y() + 1);
    }
}
