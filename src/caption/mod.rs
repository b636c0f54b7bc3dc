//! Caption Generator backed by an OpenAI-compatible chat-completions API.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::app::{FeedcasterError, Result};
use crate::domain::Caption;
use crate::transport::{Request, Transport};

#[async_trait]
pub trait CaptionGenerator {
    /// Produce post text for an article. Errors are not retried past the
    /// transport's own policy and there is no fallback caption.
    async fn generate(&self, title: &str, summary: &str, link: &str) -> Result<Caption>;
}

/// Instruction sent to the model for one article.
///
/// The summary is part of the generator interface but is not quoted to the model.
pub fn build_prompt(title: &str, link: &str) -> String {
    format!(
        "Write an engaging 2-3 sentence Instagram caption for the article titled '{}'. \
         The caption should briefly summarize the article and end with this link: {}.",
        title, link
    )
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

pub struct OpenAiCaptioner {
    transport: Arc<dyn Transport + Send + Sync>,
    api_base: String,
    model: String,
    api_key: String,
}

impl fmt::Debug for OpenAiCaptioner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCaptioner")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenAiCaptioner {
    pub fn new(
        transport: Arc<dyn Transport + Send + Sync>,
        api_base: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            api_base: api_base.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl CaptionGenerator for OpenAiCaptioner {
    async fn generate(&self, title: &str, _summary: &str, link: &str) -> Result<Caption> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": build_prompt(title, link) }],
        });

        let request = Request::post_json(self.endpoint(), body)
            .bearer(self.api_key.as_str())
            .retryable(true);
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(FeedcasterError::Completion(format!(
                "{} returned {}: {}",
                self.model,
                response.status,
                response.text()
            )));
        }

        let completion: ChatCompletion = response.json()?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| FeedcasterError::Completion("response has no message content".into()))?;

        tracing::debug!("Caption for '{}': {}", title, content);
        Ok(Caption(content))
    }
}
