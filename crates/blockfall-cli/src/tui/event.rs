use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// The screen should be redrawn.
    Render,
    Crossterm(CrosstermEvent),
}
