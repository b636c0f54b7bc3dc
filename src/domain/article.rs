/// Author recorded when a feed entry names none
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// One feed entry, as handed to the rest of the pipeline.
///
/// `published` and `summary` are carried as text and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub published: String,
    pub summary: String,
    pub author: String,
}

impl Article {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            published: String::new(),
            summary: String::new(),
            author: UNKNOWN_AUTHOR.to_string(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = published.into();
        self
    }
}

/// Generated post text, passed through to the publisher untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption(pub String);

impl Caption {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Caption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
