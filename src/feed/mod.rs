//! Feed Reader: turns an RSS/Atom document into [`Article`]s.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::SecondsFormat;
use feed_rs::parser;

use crate::app::{FeedcasterError, Result};
use crate::domain::{Article, LastChecked};
use crate::transport::{Request, Transport};

/// Source of articles for a run.
///
/// Never fails: an unreachable or malformed feed reads as an empty one.
#[async_trait]
pub trait FeedSource {
    async fn latest_articles(&self, feed_url: &str, since: LastChecked) -> Vec<Article>;
}

pub struct FeedReader {
    transport: Arc<dyn Transport + Send + Sync>,
}

impl FeedReader {
    pub fn new(transport: Arc<dyn Transport + Send + Sync>) -> Self {
        Self { transport }
    }

    async fn fetch(&self, feed_url: &str) -> Result<Vec<Article>> {
        let response = self.transport.send(Request::get(feed_url)).await?;
        if !response.is_success() {
            return Err(FeedcasterError::Status {
                url: feed_url.to_string(),
                status: response.status,
            });
        }
        parse_articles(&response.body)
    }
}

#[async_trait]
impl FeedSource for FeedReader {
    async fn latest_articles(&self, feed_url: &str, since: LastChecked) -> Vec<Article> {
        // `since` is accepted for the interface; entries are not filtered by it.
        tracing::debug!("Reading {} (last checked {})", feed_url, since.at());

        match self.fetch(feed_url).await {
            Ok(articles) => {
                tracing::info!("Fetched {} articles from {}", articles.len(), feed_url);
                articles
            }
            Err(e) => {
                tracing::warn!("Could not read feed {}: {}", feed_url, e);
                Vec::new()
            }
        }
    }
}

/// Parse a feed document, keeping entries in source order.
///
/// RSS is read with the `rss` crate so `pubDate` and `description` come through
/// exactly as written. Anything else (Atom, JSON Feed) goes through feed-rs,
/// whose dates are rendered back as RFC 3339. Entries without a title or a
/// link are dropped.
pub fn parse_articles(body: &[u8]) -> Result<Vec<Article>> {
    match rss::Channel::read_from(body) {
        Ok(channel) => Ok(channel.items().iter().filter_map(rss_article).collect()),
        Err(e) => {
            tracing::debug!("Not an RSS document ({}), trying other formats", e);
            parse_other(body)
        }
    }
}

fn rss_article(item: &rss::Item) -> Option<Article> {
    let (Some(title), Some(link)) = (item.title(), item.link()) else {
        tracing::warn!("Skipping feed entry {:?} without title or link", item.guid().map(|g| g.value()));
        return None;
    };

    let author = item
        .author()
        .map(String::from)
        .or_else(|| {
            item.dublin_core_ext()
                .and_then(|dc| dc.creators().first().cloned())
        });

    Some(
        Article::new(title, link)
            .with_summary(item.description().unwrap_or_default())
            .with_published(item.pub_date().unwrap_or_default())
            .with_author(author),
    )
}

fn parse_other(body: &[u8]) -> Result<Vec<Article>> {
    let feed = parser::parse(body).map_err(|e| FeedcasterError::FeedParse(e.to_string()))?;

    let articles = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let title = entry.title.map(|t| t.content);
            let link = entry.links.first().map(|l| l.href.clone());

            let (Some(title), Some(link)) = (title, link) else {
                tracing::warn!("Skipping feed entry {:?} without title or link", entry.id);
                return None;
            };

            let summary = entry.summary.map(|s| s.content).unwrap_or_default();
            let published = entry
                .published
                .or(entry.updated)
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
                .unwrap_or_default();
            let author = entry.authors.first().map(|a| a.name.clone());

            Some(
                Article::new(title, link)
                    .with_summary(summary)
                    .with_published(published)
                    .with_author(author),
            )
        })
        .collect();

    Ok(articles)
}
