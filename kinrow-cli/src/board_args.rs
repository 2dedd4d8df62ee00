//! Board options shared by every command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use kinrow_core::{GameConfig, KInARow};

#[derive(Args, Clone, Debug)]
pub struct BoardArgs {
    /// Side length of a square board
    #[arg(long, default_value = "3")]
    pub size: u32,

    /// Board width (overrides --size)
    #[arg(long)]
    pub width: Option<u32>,

    /// Board height (overrides --size)
    #[arg(long)]
    pub height: Option<u32>,

    /// Marks in a row needed to win
    #[arg(long, default_value = "3")]
    pub k: u32,

    /// Game config JSON file (overrides the options above)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl BoardArgs {
    pub fn game_config(&self) -> Result<GameConfig> {
        if let Some(path) = &self.config {
            return GameConfig::load(path)
                .with_context(|| format!("Failed to load game config: {}", path.display()));
        }

        Ok(GameConfig {
            width: self.width.unwrap_or(self.size),
            height: self.height.unwrap_or(self.size),
            k: self.k,
        })
    }

    pub fn build_game(&self) -> Result<KInARow> {
        let config = self.game_config()?;
        let game = config.build().context("Invalid board options")?;
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(size: u32, width: Option<u32>, height: Option<u32>, k: u32) -> BoardArgs {
        BoardArgs {
            size,
            width,
            height,
            k,
            config: None,
        }
    }

    #[test]
    fn test_size_fills_both_dimensions() {
        let config = args(4, None, None, 3).game_config().unwrap();
        assert_eq!((config.width, config.height, config.k), (4, 4, 3));
    }

    #[test]
    fn test_width_and_height_override_size() {
        let config = args(3, Some(5), Some(2), 2).game_config().unwrap();
        assert_eq!((config.width, config.height, config.k), (5, 2, 2));
    }

    #[test]
    fn test_invalid_board_is_rejected() {
        assert!(args(0, None, None, 3).build_game().is_err());
        assert!(args(3_000_000_000, None, None, 3).build_game().is_err());
        assert!(args(3, Some(100_000), Some(100_000), 3).build_game().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let mut board = args(3, None, None, 3);
        board.config = Some(PathBuf::from("/nonexistent/board.json"));
        assert!(board.build_game().is_err());
    }
}
