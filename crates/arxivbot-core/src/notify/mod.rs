mod message;
mod telegram;

pub use telegram::TelegramClient;

use async_trait::async_trait;

use crate::config::Subscription;
use crate::feed::FeedEntry;
use crate::Result;

/// Delivers a text message to a chat
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str) -> Result<()>;
}

/// Turns filter results into chat messages
pub struct Notifier<M> {
    messenger: M,
    quiet: bool,
}

impl<M: Messenger> Notifier<M> {
    /// With `quiet` set, nothing is sent when there are no matches
    pub fn new(messenger: M, quiet: bool) -> Self {
        Self { messenger, quiet }
    }

    /// Report matched entries to `chat_id`. Returns the number of messages sent.
    pub async fn notify(&self, chat_id: i64, entries: &[FeedEntry]) -> Result<usize> {
        if entries.is_empty() {
            if self.quiet {
                tracing::debug!("Nothing found for chat {}, staying quiet", chat_id);
                return Ok(0);
            }
            self.messenger.send(chat_id, &message::nothing_found()).await?;
            return Ok(1);
        }

        self.messenger.send(chat_id, &message::summary(entries.len())).await?;
        for entry in entries {
            self.messenger.send(chat_id, &message::entry(entry)).await?;
        }

        Ok(entries.len() + 1)
    }

    /// Describe a subscription to its own chat
    pub async fn send_info(&self, subscription: &Subscription) -> Result<usize> {
        self.messenger
            .send(subscription.chat_id, &message::subscription_info(subscription))
            .await?;
        Ok(1)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::Error;

    /// Records every message instead of sending it
    #[derive(Clone, Default)]
    pub struct RecordingMessenger {
        sent: Arc<Mutex<Vec<(i64, String)>>>,
        fail_after: Option<usize>,
    }

    impl RecordingMessenger {
        /// Fails every send once `count` messages went out
        pub fn failing_after(count: usize) -> Self {
            Self {
                fail_after: Some(count),
                ..Self::default()
            }
        }

        pub fn sent(&self) -> Vec<(i64, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Messenger for RecordingMessenger {
        async fn send(&self, chat_id: i64, text: &str) -> Result<()> {
            let mut sent = self.sent.lock().unwrap();
            if self.fail_after.is_some_and(|limit| sent.len() >= limit) {
                return Err(Error::Telegram("Bad Request: chat not found".to_string()));
            }
            sent.push((chat_id, text.to_string()));
            Ok(())
        }
    }
}
