//! Publisher for the Instagram Graph API.
//!
//! Publishing is two requests: `POST /{account}/media` creates a media
//! container from an image URL and caption, then `POST /{account}/media_publish`
//! turns that container into a visible post. Neither request is retried.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::app::Result;
use crate::transport::{Request, Transport};

/// How a publish attempt ended. Rejections are outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published { creation_id: String },
    /// Phase 1 answered without a container id
    ContainerRejected { body: String },
    /// Phase 2 answered with something other than 200
    PublishRejected { status: u16, body: String },
}

impl PublishOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

#[async_trait]
pub trait Publisher {
    /// `Err` only when a request could not be sent at all.
    async fn publish(&self, image_url: &str, caption: &str) -> Result<PublishOutcome>;
}

pub struct GraphPublisher {
    transport: Arc<dyn Transport + Send + Sync>,
    graph_base: String,
    account_id: String,
    access_token: String,
}

impl fmt::Debug for GraphPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphPublisher")
            .field("graph_base", &self.graph_base)
            .field("account_id", &self.account_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl GraphPublisher {
    pub fn new(
        transport: Arc<dyn Transport + Send + Sync>,
        graph_base: impl Into<String>,
        account_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            graph_base: graph_base.into(),
            account_id: account_id.into(),
            access_token: access_token.into(),
        }
    }

    fn endpoint(&self, edge: &str) -> String {
        format!(
            "{}/{}/{}",
            self.graph_base.trim_end_matches('/'),
            self.account_id,
            edge
        )
    }
}

/// Container id from a phase-1 body; Graph returns it as a string but a bare
/// number is accepted too.
pub fn container_id(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("id")? {
        serde_json::Value::String(id) if !id.is_empty() => Some(id.clone()),
        serde_json::Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

#[async_trait]
impl Publisher for GraphPublisher {
    async fn publish(&self, image_url: &str, caption: &str) -> Result<PublishOutcome> {
        let create = Request::post_form(
            self.endpoint("media"),
            [
                ("image_url", image_url),
                ("caption", caption),
                ("access_token", self.access_token.as_str()),
            ],
        );
        let response = self.transport.send(create).await?;

        let Some(creation_id) = container_id(&response.body) else {
            let body = response.text();
            tracing::error!("Error uploading media: {}", body);
            return Ok(PublishOutcome::ContainerRejected { body });
        };
        tracing::debug!("Created media container {}", creation_id);

        let publish = Request::post_form(
            self.endpoint("media_publish"),
            [
                ("creation_id", creation_id.as_str()),
                ("access_token", self.access_token.as_str()),
            ],
        );
        let response = self.transport.send(publish).await?;

        if response.status == 200 {
            tracing::info!("Post published successfully!");
            Ok(PublishOutcome::Published { creation_id })
        } else {
            let body = response.text();
            tracing::error!("Error publishing post: {}", body);
            Ok(PublishOutcome::PublishRejected {
                status: response.status,
                body,
            })
        }
    }
}
