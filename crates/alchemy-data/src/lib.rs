//! Data-file loading for alchemy catalogs.
//!
//! A data directory holds `items.{ron,toml,json}` and optionally
//! `game.{ron,toml,json}`. [`load_game_data`] reads both and returns the
//! indexed catalog together with the game configuration.

pub mod config;
pub mod loader;
pub mod schema;

pub use config::GameConfig;
pub use loader::{
    DataLoadError, GameData, GameDataReport, load_game_data, save_progress,
};
