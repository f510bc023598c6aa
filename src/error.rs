//! Error types

use miette::Diagnostic;
use thiserror::Error;

/// Application errors for plugin operations.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Plugin system error.
    #[error("Plugin error: {0}")]
    Plugin(Box<dyn std::error::Error + Send + Sync>),
}
