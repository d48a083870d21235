//! Leaderboard persistence
//!
//! `RatingStore` keeps the best score per player and difficulty on top of any
//! [`KeyValueStore`].

pub mod store;
pub mod table;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use table::{RatingEntry, RatingStore, STORAGE_KEY_PREFIX};
