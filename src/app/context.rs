use std::sync::Arc;

use crate::app::Result;
use crate::caption::OpenAiCaptioner;
use crate::config::{Config, Secrets};
use crate::feed::FeedReader;
use crate::publish::GraphPublisher;
use crate::thumbnail::OpenGraphResolver;
use crate::transport::{HttpTransport, RetryConfig, RetryingTransport, Transport};
use crate::workflow::Workflow;

pub struct AppContext {
    pub config: Config,
    pub feed: Arc<FeedReader>,
    pub captions: Arc<OpenAiCaptioner>,
    pub thumbnails: Arc<OpenGraphResolver>,
    pub publisher: Arc<GraphPublisher>,
}

impl AppContext {
    pub fn new(config: Config, secrets: Secrets) -> Result<Self> {
        for endpoint in [
            &config.feed.url,
            &config.caption.api_base,
            &config.instagram.graph_base,
        ] {
            url::Url::parse(endpoint)?;
        }

        let http: Arc<dyn Transport + Send + Sync> = Arc::new(HttpTransport::new(&config.http)?);
        let transport = Arc::new(RetryingTransport::new(http, RetryConfig::from(&config.http)));
        Ok(Self::with_transport(config, secrets, transport))
    }

    /// Wire every component onto a caller-supplied transport.
    pub fn with_transport(
        config: Config,
        secrets: Secrets,
        transport: Arc<dyn Transport + Send + Sync>,
    ) -> Self {
        let feed = Arc::new(FeedReader::new(transport.clone()));
        let captions = Arc::new(OpenAiCaptioner::new(
            transport.clone(),
            config.caption.api_base.clone(),
            config.caption.model.clone(),
            secrets.openai_api_key,
        ));
        let thumbnails = Arc::new(OpenGraphResolver::new(transport.clone()));
        let publisher = Arc::new(GraphPublisher::new(
            transport,
            config.instagram.graph_base.clone(),
            secrets.ig_account_id,
            secrets.ig_access_token,
        ));

        Self {
            config,
            feed,
            captions,
            thumbnails,
            publisher,
        }
    }

    pub fn workflow(&self) -> Workflow {
        Workflow::new(
            self.config.feed.url.clone(),
            self.feed.clone(),
            self.captions.clone(),
            self.thumbnails.clone(),
            self.publisher.clone(),
        )
    }
}
