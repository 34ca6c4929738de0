//! Game rules and state management.
//!
//! This module builds the gameplay on top of the core primitives:
//!
//! - [`Game`] - The state machine: active piece, next piece, stats and play state
//! - [`Action`] - Discrete requests from input translators and the gravity scheduler
//! - [`GameStats`] - Score, cleared lines and level
//! - [`PieceGenerator`] - Seedable source of piece kinds (uniform or 7-bag)
//! - [`EngineConfig`] - Grid size, randomizer and seed
//! - [`GameSnapshot`] - Read-only view for rendering
//!
//! # Game Flow
//!
//! 1. Create a [`Game`], optionally from an [`EngineConfig`]
//! 2. Feed it actions: moves, rotations, hard drops
//! 3. Issue a soft drop every [`Game::gravity_interval`] while it is running
//! 4. A piece that cannot fall locks, full rows clear and the next piece spawns
//! 5. When a spawned piece does not fit, the game is over until reset
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Action, Game, PieceSeed};
//!
//! let mut game = Game::with_seed(PieceSeed::from_u128(1));
//! for action in [Action::Right, Action::Rotate, Action::HardDrop] {
//!     game.apply(action);
//! }
//! assert_eq!(game.stats().completed_pieces(), 1);
//! ```

pub use self::{action::*, config::*, game::*, game_stats::*, piece_generator::*, snapshot::*};

mod action;
mod config;
mod game;
mod game_stats;
mod piece_generator;
mod snapshot;
