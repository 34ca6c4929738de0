pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Error returned by [`Game::set_active_piece`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SetActivePieceError {
    #[display("piece collides with the grid")]
    Collision,
    #[display("game is not running")]
    NotRunning,
}
