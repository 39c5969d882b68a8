use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::{Ini, ParseOption, Properties};
use url::Url;

use crate::error::ConfigError;

/// Location read when no `--config-path` is given
pub const DEFAULT_CONFIG_PATH: &str = "/etc/arxivbot/config.ini";

const BOT_SECTION: &str = "bot";

/// Telegram bot token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(String);

impl BotToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotToken(***)")
    }
}

/// How entries matching several buzzwords are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Each matching entry is reported once
    #[default]
    Once,
    /// An entry is reported once for every buzzword found in its title
    PerBuzzword,
}

impl FromStr for MatchPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "once" => Ok(Self::Once),
            "per_buzzword" => Ok(Self::PerBuzzword),
            other => Err(ConfigError::InvalidSetting {
                key: "match_policy",
                value: other.to_string(),
            }),
        }
    }
}

/// Settings from the `[bot]` section
#[derive(Debug, Clone)]
pub struct BotSettings {
    pub token: BotToken,
    /// Feed URL prefix; the category is appended verbatim
    pub feed_base_url: String,
    /// Telegram Bot API root
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub match_policy: MatchPolicy,
}

impl BotSettings {
    pub fn new(token: BotToken) -> Self {
        Self {
            token,
            feed_base_url: default_feed_base_url(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_timeout(),
            match_policy: MatchPolicy::default(),
        }
    }
}

/// One `[section]` of the config: where to read from, who to tell, what to look for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub name: String,
    pub category: String,
    pub chat_id: i64,
    pub buzzwords: Vec<String>,
}

/// Fully validated configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot: BotSettings,
    pub subscriptions: Vec<Subscription>,
}

fn default_feed_base_url() -> String {
    "http://export.arxiv.org/rss/".to_string()
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl BotConfig {
    /// Load and validate the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(&content)?;
        tracing::info!(
            "Loaded {} subscription(s) from {}",
            config.subscriptions.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse and validate INI content. Every section is checked before returning.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let options = ParseOption {
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(content, options)?;

        let mut seen = HashSet::new();
        for name in ini.sections().flatten() {
            if !seen.insert(name) {
                return Err(ConfigError::DuplicateSection(name.to_string()));
            }
        }

        let bot = ini
            .section(Some(BOT_SECTION))
            .ok_or(ConfigError::MissingBotSection)?;
        let bot = parse_bot_section(bot)?;

        let subscriptions = ini
            .iter()
            .filter_map(|(name, props)| name.map(|name| (name, props)))
            .filter(|(name, _)| *name != BOT_SECTION)
            .map(|(name, props)| parse_subscription(name, props))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { bot, subscriptions })
    }

    /// Default path, or the override from the command line
    pub fn resolve_path(override_path: Option<PathBuf>) -> PathBuf {
        override_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}

/// Keys are case-insensitive, section names are not
fn get<'a>(props: &'a Properties, key: &str) -> Option<&'a str> {
    props
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, value)| value)
}

fn parse_bot_section(props: &Properties) -> Result<BotSettings, ConfigError> {
    let token = get(props, "token")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ConfigError::MissingToken)?;

    let mut settings = BotSettings::new(BotToken::new(token));

    if let Some(url) = get(props, "feed_base_url") {
        settings.feed_base_url = validate_url("feed_base_url", url)?;
    }
    if let Some(url) = get(props, "api_base_url") {
        settings.api_base_url = validate_url("api_base_url", url)?;
    }
    if let Some(timeout) = get(props, "request_timeout_secs") {
        settings.request_timeout_secs = timeout
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| ConfigError::InvalidSetting {
                key: "request_timeout_secs",
                value: timeout.to_string(),
            })?;
    }
    if let Some(policy) = get(props, "match_policy") {
        settings.match_policy = policy.parse()?;
    }

    Ok(settings)
}

fn validate_url(key: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl { key, source })?;
    Ok(value.to_string())
}

fn required<'a>(section: &str, props: &'a Properties, key: &'static str) -> Result<&'a str, ConfigError> {
    let value = get(props, key).ok_or_else(|| ConfigError::IncompleteSection {
        section: section.to_string(),
        key,
    })?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::EmptyValue {
            section: section.to_string(),
            key,
        });
    }
    Ok(value)
}

fn parse_subscription(section: &str, props: &Properties) -> Result<Subscription, ConfigError> {
    let category = required(section, props, "category")?;
    let raw_chat_id = required(section, props, "chat_id")?;
    let raw_buzzwords = required(section, props, "buzzwords")?;

    let chat_id = raw_chat_id
        .parse::<i64>()
        .map_err(|_| ConfigError::InvalidChatId {
            section: section.to_string(),
            value: raw_chat_id.to_string(),
        })?;

    let buzzwords = split_buzzwords(raw_buzzwords);
    if buzzwords.is_empty() {
        return Err(ConfigError::EmptyValue {
            section: section.to_string(),
            key: "buzzwords",
        });
    }

    Ok(Subscription {
        name: section.to_string(),
        category: category.to_string(),
        chat_id,
        buzzwords,
    })
}

/// Split a comma separated list, dropping blanks
pub fn split_buzzwords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
