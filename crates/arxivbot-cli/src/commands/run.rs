use std::path::Path;

use anyhow::Result;

use arxivbot_core::{
    feed::{build_http_client, FeedFetcher},
    notify::{Notifier, TelegramClient},
    BotConfig, Pipeline, RunMode,
};

pub async fn run(config_path: &Path, quiet: bool, mode: RunMode) -> Result<()> {
    // Validate everything before the first request goes out
    let config = BotConfig::load(config_path)?;

    let client = build_http_client(config.bot.request_timeout_secs)?;
    let fetcher = FeedFetcher::from_settings(client.clone(), &config.bot);
    let telegram = TelegramClient::from_settings(client, &config.bot);

    let pipeline = Pipeline::new(
        fetcher,
        Notifier::new(telegram, quiet),
        config.bot.match_policy,
    );

    pipeline.run(&config.subscriptions, mode).await?;

    Ok(())
}
