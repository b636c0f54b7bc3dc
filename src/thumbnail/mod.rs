//! Thumbnail Resolver: reads an article page's Open Graph preview image.

use std::sync::Arc;

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::app::Result;
use crate::transport::{Request, Transport};

#[async_trait]
pub trait ThumbnailResolver {
    /// `Ok(None)` when the page declares no preview image. Failing to fetch
    /// the page at all is an error.
    async fn resolve(&self, article_url: &str) -> Result<Option<String>>;
}

pub struct OpenGraphResolver {
    transport: Arc<dyn Transport + Send + Sync>,
}

impl OpenGraphResolver {
    pub fn new(transport: Arc<dyn Transport + Send + Sync>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ThumbnailResolver for OpenGraphResolver {
    async fn resolve(&self, article_url: &str) -> Result<Option<String>> {
        let response = self.transport.send(Request::get(article_url)).await?;
        if !response.is_success() {
            tracing::debug!("{} returned {}, parsing body anyway", article_url, response.status);
        }

        let image = extract_og_image(&response.text());
        tracing::debug!("og:image for {}: {:?}", article_url, image);
        Ok(image)
    }
}

/// First non-empty `<meta property="og:image" content="...">` in the document.
pub fn extract_og_image(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"meta[property="og:image"]"#).ok()?;

    document
        .select(&selector)
        .filter_map(|meta| meta.value().attr("content"))
        .find(|content| !content.trim().is_empty())
        .map(String::from)
}
