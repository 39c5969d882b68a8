use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arxivbot_core::{BotConfig, RunMode};

mod commands;

#[derive(Parser)]
#[command(name = "arxivbot")]
#[command(author, version, about = "Scrape arXiv RSS feeds and send matching articles to Telegram")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (default: /etc/arxivbot/config.ini)
    #[arg(short = 'c', long = "config-path", global = true)]
    config_path: Option<PathBuf>,

    /// Do not send a message when no article is found
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Send each chat its configuration instead of the updates
    #[arg(short = 'p', long, global = true)]
    print_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, filter and send updates (default)
    Run,
    /// Validate the configuration and print the subscriptions
    List,
    /// Print a configuration built from AUB_TOKEN, AUB_CHAT_IDS, AUB_CATEGORIES and AUB_BUZZWORDS
    GenerateConfig {
        /// Write to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config_path = BotConfig::resolve_path(cli.config_path);

    match cli.command {
        Some(Commands::Run) | None => {
            let mode = if cli.print_info {
                RunMode::PrintInfo
            } else {
                RunMode::Digest
            };
            commands::run::run(&config_path, cli.quiet, mode).await
        }
        Some(Commands::List) => commands::list::run(&config_path),
        Some(Commands::GenerateConfig { output }) => commands::generate::run(output.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_without_subcommand() {
        let cli = Cli::try_parse_from(["arxivbot", "-c", "/tmp/bot.ini", "-q", "-p"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config_path, Some(PathBuf::from("/tmp/bot.ini")));
        assert!(cli.quiet);
        assert!(cli.print_info);
    }

    #[test]
    fn test_long_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["arxivbot", "run", "--quiet", "--config-path", "x.ini"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Run)));
        assert!(cli.quiet);
        assert!(!cli.print_info);
    }

    #[test]
    fn test_generate_config_output() {
        let cli = Cli::try_parse_from(["arxivbot", "generate-config", "-o", "out.ini"]).unwrap();
        match cli.command {
            Some(Commands::GenerateConfig { output }) => {
                assert_eq!(output, Some(PathBuf::from("out.ini")));
            }
            _ => panic!("expected generate-config"),
        }
    }
}
