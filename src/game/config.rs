use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Most cells along one side of the grid
pub const MAX_CELL_COUNT: u32 = 200;

/// Largest grid side in pixels
pub const MAX_GRID_SIZE: u32 = 2048;

/// Errors raised when a configuration cannot describe a playable grid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell size must be at least 2 pixels, got {0}")]
    CellSizeTooSmall(u32),

    #[error("cell count must be at least 2, got {0}")]
    CellCountTooSmall(u32),

    #[error("grid of {cell_count} cells of {cell_size}px does not fit the drawing surface")]
    GridTooLarge { cell_size: u32, cell_count: u32 },

    #[error("initial snake length must be at least 1")]
    EmptySnake,

    #[error("start column {column} is outside a grid of {cell_count} cells")]
    StartColumnOutOfRange { column: u32, cell_count: u32 },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side of one cell in pixels
    pub cell_size: u32,
    /// Number of cells along each side of the square grid
    pub cell_count: u32,
    /// Initial length of the snake (clamped to the grid height)
    pub initial_snake_length: u32,
    /// Column the snake is seeded in
    pub start_column: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 20,
            cell_count: 25,
            initial_snake_length: 5,
            start_column: 0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom cell size and count
    pub fn new(cell_size: u32, cell_count: u32) -> Self {
        Self {
            cell_size,
            cell_count,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Side of the whole grid in pixels
    pub fn grid_size(&self) -> u32 {
        self.cell_size * self.cell_count
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size < 2 {
            return Err(ConfigError::CellSizeTooSmall(self.cell_size));
        }
        if self.cell_count < 2 {
            return Err(ConfigError::CellCountTooSmall(self.cell_count));
        }
        let fits = self.cell_count <= MAX_CELL_COUNT
            && self
                .cell_size
                .checked_mul(self.cell_count)
                .is_some_and(|size| size <= MAX_GRID_SIZE);
        if !fits {
            return Err(ConfigError::GridTooLarge {
                cell_size: self.cell_size,
                cell_count: self.cell_count,
            });
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        if self.start_column >= self.cell_count {
            return Err(ConfigError::StartColumnOutOfRange {
                column: self.start_column,
                cell_count: self.cell_count,
            });
        }
        Ok(())
    }
}

/// A named tick interval. The label also partitions the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub label: String,
    pub tick_ms: u64,
}

impl Difficulty {
    pub fn new(label: impl Into<String>, tick_ms: u64) -> Self {
        Self {
            label: label.into(),
            tick_ms,
        }
    }

    pub fn easy() -> Self {
        Self::new("Easy", 300)
    }

    pub fn medium() -> Self {
        Self::new("Medium", 200)
    }

    pub fn hard() -> Self {
        Self::new("Hard", 100)
    }

    pub fn insane() -> Self {
        Self::new("Insane", 60)
    }

    /// Presets offered by the start dialog, slowest first
    pub fn presets() -> Vec<Difficulty> {
        vec![Self::easy(), Self::medium(), Self::hard(), Self::insane()]
    }

    /// Interval between two ticks. Zero is bumped to one millisecond.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::medium()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.cell_count, 25);
        assert_eq!(config.initial_snake_length, 5);
        assert_eq!(config.grid_size(), 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.cell_size, 15);
        assert_eq!(config.cell_count, 12);
        assert_eq!(config.grid_size(), 180);
    }

    #[test]
    fn test_rejects_degenerate_grids() {
        assert_eq!(
            GameConfig::new(1, 10).validate(),
            Err(ConfigError::CellSizeTooSmall(1))
        );
        assert_eq!(
            GameConfig::new(10, 1).validate(),
            Err(ConfigError::CellCountTooSmall(1))
        );
        assert!(matches!(
            GameConfig::new(u32::MAX, 4).validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));

        let config = GameConfig {
            start_column: 10,
            ..GameConfig::small()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartColumnOutOfRange { column: 10, .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_grids() {
        assert_eq!(
            GameConfig::new(2, 33_000).validate(),
            Err(ConfigError::GridTooLarge {
                cell_size: 2,
                cell_count: 33_000
            })
        );
        assert!(matches!(
            GameConfig::new(MAX_GRID_SIZE, 2).validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));
        assert!(GameConfig::new(2, MAX_CELL_COUNT).validate().is_ok());
        assert!(matches!(
            GameConfig::new(2, MAX_CELL_COUNT + 1).validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));
        assert!(GameConfig::new(10, 200).validate().is_ok());
        assert!(GameConfig::new(20, 200).validate().is_err());
    }

    #[test]
    fn test_difficulty_presets() {
        let presets = Difficulty::presets();
        assert_eq!(presets.len(), 4);
        assert!(presets.windows(2).all(|w| w[0].tick_ms > w[1].tick_ms));
        assert_eq!(Difficulty::default().label, "Medium");
        assert_eq!(Difficulty::new("Zero", 0).tick_interval(), Duration::from_millis(1));
    }
}
