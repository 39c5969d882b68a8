/// A single entry from a fetched feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// GUID or Atom id
    pub id: String,
    pub title: String,
    /// Author names in document order
    pub authors: Vec<String>,
    pub url: Option<String>,
}

impl FeedEntry {
    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }

    /// Link for the reader: the entry URL when present, the identifier otherwise
    pub fn link(&self) -> &str {
        self.url.as_deref().unwrap_or(&self.id)
    }
}
