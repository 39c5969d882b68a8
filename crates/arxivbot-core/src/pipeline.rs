use crate::config::{MatchPolicy, Subscription};
use crate::feed::FeedSource;
use crate::filter::KeywordFilter;
use crate::notify::{Messenger, Notifier};
use crate::Result;

/// What a run does for each subscription
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Fetch, filter and report matching entries
    #[default]
    Digest,
    /// Tell each chat what it is subscribed to, without fetching anything
    PrintInfo,
}

/// Totals for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub subscriptions: usize,
    pub matched: usize,
    pub messages_sent: usize,
}

/// Drives fetch, filter and notify for every subscription, one after another
pub struct Pipeline<F, M> {
    source: F,
    notifier: Notifier<M>,
    policy: MatchPolicy,
}

impl<F: FeedSource, M: Messenger> Pipeline<F, M> {
    pub fn new(source: F, notifier: Notifier<M>, policy: MatchPolicy) -> Self {
        Self {
            source,
            notifier,
            policy,
        }
    }

    /// Process subscriptions in order. The first error stops the run.
    pub async fn run(&self, subscriptions: &[Subscription], mode: RunMode) -> Result<RunReport> {
        let mut report = RunReport::default();

        for subscription in subscriptions {
            match mode {
                RunMode::Digest => {
                    let (matched, sent) = self.process(subscription).await?;
                    report.matched += matched;
                    report.messages_sent += sent;
                }
                RunMode::PrintInfo => {
                    report.messages_sent += self.notifier.send_info(subscription).await?;
                }
            }
            report.subscriptions += 1;
        }

        tracing::info!(
            "Run complete: {} subscription(s), {} match(es), {} message(s) sent",
            report.subscriptions,
            report.matched,
            report.messages_sent
        );

        Ok(report)
    }

    /// Returns (matched entries, messages sent) for one subscription
    async fn process(&self, subscription: &Subscription) -> Result<(usize, usize)> {
        tracing::info!(
            "Processing [{}]: category {} for chat {}",
            subscription.name,
            subscription.category,
            subscription.chat_id
        );

        let entries = self.source.entries(&subscription.category).await?;
        let filter = KeywordFilter::new(&subscription.buzzwords, self.policy);
        let matched = filter.filter_entries(&entries);

        tracing::info!(
            "[{}]: {} of {} entries matched",
            subscription.name,
            matched.len(),
            entries.len()
        );

        let sent = self.notifier.notify(subscription.chat_id, &matched).await?;
        Ok((matched.len(), sent))
    }
}
