//! Unified error types for `PartnerBuddy`.
//!
//! Every failure a command can hit is one of these variants. Command handlers
//! turn them into replies for the invoking user; none of them stop the process.

use thiserror::Error;

/// Errors produced by the credit ledger, the command flows and the Discord layer.
#[derive(Debug, Error)]
pub enum Error {
    /// The actor does not hold the configured partner staff role.
    #[error("Unauthorized: the partner staff role is required")]
    Unauthorized,

    /// Malformed input caught before it reaches the ledger.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the input
        message: String,
    },

    /// A channel identifier the command depends on is not configured.
    #[error("Configuration missing: {setting} is not set")]
    ConfigurationMissing {
        /// Name of the missing setting (the environment variable)
        setting: &'static str,
    },

    /// The messaging collaborator could not fetch a channel or send a message.
    #[error("Delivery failure: {message}")]
    DeliveryFailure {
        /// Diagnostic reported by the collaborator
        message: String,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Details of the configuration problem
        message: String,
    },

    /// Environment variable lookup failed.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error.
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
