//! # Alchemy Development Tools
//!
//! Command-line tools for content authors:
//! - Data directory validation
//! - Per-era catalog summaries

pub mod eras;
pub mod validate;

/// Errors surfaced by the tools.
#[derive(Debug, thiserror::Error)]
pub enum ToolsError {
    #[error(transparent)]
    Load(#[from] alchemy_data::DataLoadError),

    #[error("{problems} problem(s) found")]
    Invalid { problems: usize },
}
