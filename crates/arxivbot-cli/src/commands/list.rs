use std::path::Path;

use anyhow::Result;

use arxivbot_core::{BotConfig, MatchPolicy};

pub fn run(config_path: &Path) -> Result<()> {
    let config = BotConfig::load(config_path)?;

    if config.subscriptions.is_empty() {
        println!("No subscriptions in {}.", config_path.display());
        println!("\nAdd a section like:");
        println!("  [cs]");
        println!("  category = cs.AI");
        println!("  chat_id = 123456789");
        println!("  buzzwords = transformer,diffusion");
        return Ok(());
    }

    println!("Subscriptions ({}):\n", config.subscriptions.len());

    for sub in &config.subscriptions {
        println!("  [{}] {} -> chat {}", sub.name, sub.category, sub.chat_id);
        println!("    Feed: {}{}", config.bot.feed_base_url, sub.category);
        println!("    Buzzwords: {}", sub.buzzwords.join(", "));
        println!();
    }

    if config.bot.match_policy == MatchPolicy::PerBuzzword {
        println!("Entries matching several buzzwords are sent once per buzzword.");
    }

    Ok(())
}
