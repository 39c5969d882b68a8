pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod generator;
pub mod notify;
pub mod pipeline;

#[cfg(test)]
mod test_server;

pub use config::{BotConfig, BotSettings, BotToken, MatchPolicy, Subscription};
pub use error::{ConfigError, Error, Result};
pub use pipeline::{Pipeline, RunMode, RunReport};
