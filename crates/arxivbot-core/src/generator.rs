//! Builds a configuration file from flat, semicolon separated values.
//!
//! Container deployments provide the bot settings as environment variables:
//! `AUB_TOKEN`, `AUB_CHAT_IDS`, `AUB_CATEGORIES` and `AUB_BUZZWORDS`. Position
//! `i` of each list describes subscription `i`. The caller reads the variables
//! and hands them over through [`GeneratorInput::from_lookup`].

use std::collections::HashMap;

use crate::config::BotConfig;
use crate::error::ConfigError;

pub const TOKEN_VAR: &str = "AUB_TOKEN";
pub const CHAT_IDS_VAR: &str = "AUB_CHAT_IDS";
pub const CATEGORIES_VAR: &str = "AUB_CATEGORIES";
pub const BUZZWORDS_VAR: &str = "AUB_BUZZWORDS";

/// Values needed to render a configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInput {
    pub token: String,
    pub chat_ids: Vec<String>,
    pub categories: Vec<String>,
    /// One comma separated buzzword list per category
    pub buzzwords: Vec<String>,
}

impl GeneratorInput {
    /// Collect the input through `lookup`, usually an environment reader
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str| lookup(name).ok_or(ConfigError::MissingVariable(name));

        Ok(Self {
            token: var(TOKEN_VAR)?.trim().to_string(),
            chat_ids: split_list(&var(CHAT_IDS_VAR)?),
            categories: split_list(&var(CATEGORIES_VAR)?),
            buzzwords: split_list(&var(BUZZWORDS_VAR)?),
        })
    }

    /// Render the INI text. The result is validated with the regular loader
    /// so a generated file is always loadable.
    pub fn render(&self) -> Result<String, ConfigError> {
        let expected = self.categories.len();
        for (name, list) in [(CHAT_IDS_VAR, &self.chat_ids), (BUZZWORDS_VAR, &self.buzzwords)] {
            if list.len() != expected {
                return Err(ConfigError::LengthMismatch {
                    name,
                    expected,
                    found: list.len(),
                });
            }
        }

        let mut out = format!("[bot]\ntoken = {}\n", self.token);

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for ((category, chat_id), buzzwords) in self
            .categories
            .iter()
            .zip(&self.chat_ids)
            .zip(&self.buzzwords)
        {
            let count = seen.entry(category.as_str()).or_insert(0);
            *count += 1;
            let section = if *count == 1 {
                category.clone()
            } else {
                format!("{}_{}", category, count)
            };

            out.push_str(&format!(
                "\n[{}]\nchat_id = {}\ncategory = {}\nbuzzwords = {}\n",
                section, chat_id, category, buzzwords
            ));
        }

        BotConfig::parse(&out)?;
        Ok(out)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_render_from_lookup() {
        let input = GeneratorInput::from_lookup(lookup(&[
            (TOKEN_VAR, "123:abc"),
            (CHAT_IDS_VAR, "42;-1001"),
            (CATEGORIES_VAR, "cs.AI;quant-ph"),
            (BUZZWORDS_VAR, "transformer,diffusion;qubit"),
        ]))
        .unwrap();

        let text = input.render().unwrap();
        assert!(text.starts_with("[bot]\ntoken = 123:abc\n"));
        assert!(text.contains("[cs.AI]\nchat_id = 42\ncategory = cs.AI\nbuzzwords = transformer,diffusion\n"));

        let config = BotConfig::parse(&text).unwrap();
        assert_eq!(config.bot.token.expose(), "123:abc");
        assert_eq!(config.subscriptions.len(), 2);
        assert_eq!(config.subscriptions[1].category, "quant-ph");
        assert_eq!(config.subscriptions[1].chat_id, -1001);
        assert_eq!(config.subscriptions[1].buzzwords, vec!["qubit"]);
    }

    #[test]
    fn test_missing_variable() {
        let err = GeneratorInput::from_lookup(lookup(&[(TOKEN_VAR, "t")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVariable(CHAT_IDS_VAR)));
    }

    #[test]
    fn test_length_mismatch() {
        let input = GeneratorInput {
            token: "t".to_string(),
            chat_ids: vec!["1".to_string()],
            categories: vec!["cs.AI".to_string(), "math.CO".to_string()],
            buzzwords: vec!["a".to_string(), "b".to_string()],
        };

        match input.render().unwrap_err() {
            ConfigError::LengthMismatch { name, expected, found } => {
                assert_eq!(name, CHAT_IDS_VAR);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_repeated_category_gets_distinct_sections() {
        let input = GeneratorInput {
            token: "t".to_string(),
            chat_ids: vec!["1".to_string(), "2".to_string()],
            categories: vec!["cs.AI".to_string(), "cs.AI".to_string()],
            buzzwords: vec!["llm".to_string(), "agents".to_string()],
        };

        let config = BotConfig::parse(&input.render().unwrap()).unwrap();
        let names: Vec<_> = config.subscriptions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["cs.AI", "cs.AI_2"]);
        assert_eq!(config.subscriptions[1].chat_id, 2);
    }

    #[test]
    fn test_bad_chat_id_fails_validation() {
        let input = GeneratorInput {
            token: "t".to_string(),
            chat_ids: vec!["me".to_string()],
            categories: vec!["cs.AI".to_string()],
            buzzwords: vec!["llm".to_string()],
        };

        assert!(matches!(input.render().unwrap_err(), ConfigError::InvalidChatId { .. }));
    }
}
