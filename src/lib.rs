//! Canvas Snake - Snake on a cell grid with wrap-around movement
//!
//! This library provides:
//! - Core game logic: grid, snake state machine and food placement (game module)
//! - Leaderboard persistence per difficulty (rating module)
//! - Drawing surface, in-memory canvas and TUI rendering (render module)
//! - Keyboard input mapping (input module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod rating;
pub mod render;
