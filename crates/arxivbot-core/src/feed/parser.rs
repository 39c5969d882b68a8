use feed_rs::parser;

use super::models::FeedEntry;
use crate::{Error, Result};

/// Parse RSS/Atom content into entries, keeping document order.
/// An empty body or a feed without entries yields an empty list.
pub fn parse_feed(content: &[u8]) -> Result<Vec<FeedEntry>> {
    if content.iter().all(u8::is_ascii_whitespace) {
        tracing::warn!("Feed response is empty");
        return Ok(Vec::new());
    }

    let feed = parser::parse(content)
        .map_err(|e| Error::FeedParse(e.to_string()))?;

    let entries = feed.entries.into_iter().map(|entry| {
        let title = entry.title
            .map(|t| t.content.trim().to_string())
            .unwrap_or_else(|| "Untitled".to_string());

        let authors = entry.authors
            .into_iter()
            .map(|person| person.name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        let url = entry.links.first().map(|l| l.href.clone());

        FeedEntry {
            id: entry.id,
            title,
            authors,
            url,
        }
    }).collect();

    Ok(entries)
}
