use thiserror::Error;

use crate::database::{MAX_ADJUSTMENT, MIN_ADJUSTMENT};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(
        "Insanity must be between {} and {} (got {delta}).",
        MIN_ADJUSTMENT,
        MAX_ADJUSTMENT
    )]
    InvalidAdjustment { delta: i64 },

    #[error("You cannot confound yourself.")]
    SelfTargetRejected,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors surfaced by a command. Everything ends up as a reply in the
/// originating channel; see [`BotError::user_message`].
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("You need to be in a voice channel to do that.")]
    NotInVoiceChannel,

    #[error("I'm not connected to a voice channel.")]
    NotConnected,

    #[error("You need the `{role}` role to use this command.")]
    PermissionDenied { role: String },

    #[error("{0}")]
    Usage(String),

    #[error("voice client was not registered")]
    VoiceUnavailable,

    #[error("failed to join voice channel: {0}")]
    Join(#[from] songbird::error::JoinError),

    #[error("discord error: {0}")]
    Discord(#[from] serenity::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl BotError {
    pub fn usage(text: impl Into<String>) -> Self {
        BotError::Usage(text.into())
    }

    /// Reply text for errors caused by the caller. `None` means the failure is
    /// ours and should be logged instead of shown.
    pub fn user_message(&self) -> Option<String> {
        match self {
            BotError::Ledger(LedgerError::Database(_)) => None,
            BotError::Ledger(e) => Some(e.to_string()),
            BotError::NotInVoiceChannel
            | BotError::NotConnected
            | BotError::PermissionDenied { .. }
            | BotError::Usage(_) => Some(self.to_string()),
            BotError::VoiceUnavailable
            | BotError::Join(_)
            | BotError::Discord(_)
            | BotError::Http(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Anything that keeps the bot from coming up. Fatal.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to initialize database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("discord client error: {0}")]
    Discord(#[from] serenity::Error),
}
