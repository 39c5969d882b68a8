use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Telegram API error: {0}")]
    Telegram(String),
}

/// Problems found while loading or generating the bot configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read configuration file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("A [bot] section must be in the configuration file to set the token")]
    MissingBotSection,

    #[error("The [bot] section must have the bot token")]
    MissingToken,

    #[error("Section [{0}] appears more than once")]
    DuplicateSection(String),

    #[error("Section [{section}] is not complete: missing '{key}' (category, chat_id and buzzwords are required)")]
    IncompleteSection { section: String, key: &'static str },

    #[error("Section [{section}] has an empty '{key}'")]
    EmptyValue { section: String, key: &'static str },

    #[error("Section [{section}] has an invalid chat_id '{value}'")]
    InvalidChatId { section: String, value: String },

    #[error("Invalid value '{value}' for '{key}' in [bot]")]
    InvalidSetting { key: &'static str, value: String },

    #[error("Invalid URL for '{key}': {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("Malformed configuration file: {0}")]
    Syntax(#[from] ini::ParseError),

    #[error("Environment variable {0} is not set")]
    MissingVariable(&'static str),

    #[error("Expected {expected} entries in {name}, found {found}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
