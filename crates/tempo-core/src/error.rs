//! Centralized error types for the Tempo application.
//!
//! Network and API failures are owned by the `tempo-ipma` crate and are
//! absorbed at the controller boundary; what remains here are the startup
//! errors that can abort the process, with user-friendly messages
//! suitable for terminal display.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the user config directory")]
    NoConfigDir,

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Configuration file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NoConfigDir => {
                "Could not locate a config directory on this system."
            }
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => {
                "Configuration file is malformed. Check your settings."
            }
            ConfigError::Io(_) => "Could not read or write the configuration file.",
        }
    }
}
