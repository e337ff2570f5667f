//! Error types for the application

use thiserror::Error;

/// Result type alias using our BotError
pub type Result<T> = std::result::Result<T, BotError>;

/// Main error type for bot operations
#[derive(Error, Debug)]
pub enum BotError {
    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Symbol outside the tracked set
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    /// Malformed command argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No price is known for a symbol
    #[error("Price unavailable: {0}")]
    PriceUnavailable(String),

    /// Series too short for the requested computation
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Direct message delivery failed
    #[error("Notification delivery failed: {0}")]
    Notification(String),

    /// Chat gateway errors
    #[error("Discord error: {0}")]
    Discord(String),

    /// Socket and file errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BotError {
    /// Text suitable for replying to the user who caused the error
    ///
    /// Input errors carry a message written for users; everything else is
    /// shown with its category.
    pub fn user_message(&self) -> String {
        match self {
            BotError::InvalidInput(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<poise::serenity_prelude::Error> for BotError {
    fn from(err: poise::serenity_prelude::Error) -> Self {
        BotError::Discord(err.to_string())
    }
}

impl From<config::ConfigError> for BotError {
    fn from(err: config::ConfigError) -> Self {
        BotError::Configuration(err.to_string())
    }
}
