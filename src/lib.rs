//! Termfolio - a terminal portfolio with a falling-glyph background
//!
//! - `rain`: host-agnostic digital rain layer (columns, glyph cache, throttled
//!   frame loop with cancellable frame handles)
//! - `tui`: ratatui host for the rain plus the command bar and section panel
//! - `config`: TOML configuration and portfolio content

pub mod config;
pub mod rain;
pub mod theme;
pub mod tui;

pub use config::TermfolioConfig;
pub use rain::{RainLayer, RainOptions};
pub use theme::ThemeMode;

use std::path::PathBuf;

/// Result type for Termfolio operations
pub type Result<T> = std::result::Result<T, TermfolioError>;

/// Errors that can occur in Termfolio
#[derive(Debug, thiserror::Error)]
pub enum TermfolioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    Config(String),
}
