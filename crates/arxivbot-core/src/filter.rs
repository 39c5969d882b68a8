use crate::config::MatchPolicy;
use crate::feed::FeedEntry;

/// Title filter built from a subscription's buzzwords
pub struct KeywordFilter {
    buzzwords: Vec<String>,
    policy: MatchPolicy,
}

impl KeywordFilter {
    pub fn new(buzzwords: &[String], policy: MatchPolicy) -> Self {
        Self {
            buzzwords: buzzwords.iter().map(|b| b.to_lowercase()).collect(),
            policy,
        }
    }

    /// Buzzwords found in `title`, case-insensitively, in configured order
    pub fn hits<'a>(&'a self, title: &str) -> impl Iterator<Item = &'a str> + 'a {
        let title = title.to_lowercase();
        self.buzzwords
            .iter()
            .filter(move |buzzword| title.contains(buzzword.as_str()))
            .map(String::as_str)
    }

    pub fn matches(&self, title: &str) -> bool {
        self.hits(title).next().is_some()
    }

    /// Select matching entries, keeping feed order
    pub fn filter_entries(&self, entries: &[FeedEntry]) -> Vec<FeedEntry> {
        let mut selected = Vec::new();

        for entry in entries {
            let copies = match self.policy {
                MatchPolicy::Once => usize::from(self.matches(&entry.title)),
                MatchPolicy::PerBuzzword => self.hits(&entry.title).count(),
            };

            if copies > 0 {
                tracing::debug!("Matched '{}' ({} hit(s))", entry.title, copies);
            }
            selected.extend(std::iter::repeat(entry).take(copies).cloned());
        }

        selected
    }
}
