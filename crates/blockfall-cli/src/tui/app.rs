use crossterm::event::Event;
use ratatui::Frame;

use super::Runtime;

/// Trait for applications driven by [`Runtime::run`].
pub trait App {
    /// Called once before the loop starts. Configure the tick interval and render mode here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event);

    fn draw(&self, frame: &mut Frame);

    /// Called on every tick while a tick interval is set.
    fn update(&mut self, runtime: &mut Runtime);
}
