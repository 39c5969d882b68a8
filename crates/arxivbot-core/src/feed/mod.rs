mod fetcher;
mod models;
mod parser;

pub use fetcher::{build_http_client, FeedFetcher, FeedSource};
pub use models::FeedEntry;
pub use parser::parse_feed;
