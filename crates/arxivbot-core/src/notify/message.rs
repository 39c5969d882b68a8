use html_escape::encode_text;

use crate::config::Subscription;
use crate::feed::FeedEntry;

const UNKNOWN_AUTHOR: &str = "Unknown";

pub fn nothing_found() -> String {
    "I scraped the arXiv RSS but found nothing of interest for you. Sorry.".to_string()
}

pub fn summary(count: usize) -> String {
    format!(
        "You are going to be happy. I found {} article(s) of potential interest.",
        count
    )
}

/// One matched entry with bold labels
pub fn entry(entry: &FeedEntry) -> String {
    let author = entry.first_author().unwrap_or_else(|| {
        tracing::warn!("Entry '{}' has no authors", entry.title);
        UNKNOWN_AUTHOR
    });

    format!(
        "<strong>Title</strong>: {}\n<strong>Authors</strong>: {}\n<strong>Link</strong>: {}",
        encode_text(&entry.title),
        encode_text(author),
        encode_text(entry.link())
    )
}

pub fn subscription_info(subscription: &Subscription) -> String {
    format!(
        "Hi there! I am configured to send articles from category {} with buzzwords {}",
        encode_text(&subscription.category),
        encode_text(&subscription.buzzwords.join(", "))
    )
}
