//! Core game logic module for Snake
//!
//! The grid, the snake state machine and food placement. Drawing goes through
//! the [`Surface`](crate::render::Surface) trait and results are stored
//! through a [`KeyValueStore`](crate::rating::KeyValueStore), so the engine
//! runs the same under the terminal UI and in tests.

pub mod action;
pub mod config;
pub mod engine;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{ConfigError, Difficulty, GameConfig};
pub use engine::{GameEngine, TickOutcome};
pub use grid::Grid;
pub use state::{Cell, Phase, Snake};
