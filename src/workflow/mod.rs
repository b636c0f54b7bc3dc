//! Workflow Driver: one pass of feed → caption → thumbnail → publish.
//!
//! Only the first article the feed returns is ever considered. Cadence is left
//! to whatever invokes the binary.

use std::sync::Arc;

use crate::app::Result;
use crate::caption::CaptionGenerator;
use crate::domain::{Article, Caption, LastChecked};
use crate::feed::FeedSource;
use crate::publish::{PublishOutcome, Publisher};
use crate::thumbnail::ThumbnailResolver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The feed was empty or could not be read
    NoArticles,
    /// The first article's page declares no preview image; nothing was posted
    NoThumbnail { title: String },
    /// Everything up to publishing ran; publishing was switched off
    DryRun {
        article: Article,
        caption: Caption,
        image_url: String,
    },
    Publish(PublishOutcome),
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// Completion time of this run, to hand to the next one
    pub last_checked: LastChecked,
}

pub struct Workflow {
    feed_url: String,
    feed: Arc<dyn FeedSource + Send + Sync>,
    captions: Arc<dyn CaptionGenerator + Send + Sync>,
    thumbnails: Arc<dyn ThumbnailResolver + Send + Sync>,
    publisher: Arc<dyn Publisher + Send + Sync>,
    dry_run: bool,
}

impl Workflow {
    pub fn new(
        feed_url: impl Into<String>,
        feed: Arc<dyn FeedSource + Send + Sync>,
        captions: Arc<dyn CaptionGenerator + Send + Sync>,
        thumbnails: Arc<dyn ThumbnailResolver + Send + Sync>,
        publisher: Arc<dyn Publisher + Send + Sync>,
    ) -> Self {
        Self {
            feed_url: feed_url.into(),
            feed,
            captions,
            thumbnails,
            publisher,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Run once. Caption and page-fetch failures abort the run with `Err`.
    pub async fn run(&self, last_checked: LastChecked) -> Result<RunReport> {
        let articles = self.feed.latest_articles(&self.feed_url, last_checked).await;

        let outcome = match articles.into_iter().next() {
            None => {
                tracing::info!("No articles in {}", self.feed_url);
                RunOutcome::NoArticles
            }
            Some(article) => self.process(article).await?,
        };

        Ok(RunReport {
            outcome,
            last_checked: LastChecked::now(),
        })
    }

    async fn process(&self, article: Article) -> Result<RunOutcome> {
        tracing::info!("Processing article: {}", article.title);

        let caption = self
            .captions
            .generate(&article.title, &article.summary, &article.link)
            .await?;

        let Some(image_url) = self.thumbnails.resolve(&article.link).await? else {
            tracing::warn!("No thumbnail found for article: {}", article.title);
            return Ok(RunOutcome::NoThumbnail {
                title: article.title,
            });
        };

        if self.dry_run {
            tracing::info!(
                "Dry run, not publishing\n  image: {}\n  caption: {}",
                image_url,
                caption
            );
            return Ok(RunOutcome::DryRun {
                article,
                caption,
                image_url,
            });
        }

        let outcome = self.publisher.publish(&image_url, caption.as_str()).await?;
        Ok(RunOutcome::Publish(outcome))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::app::FeedcasterError;
    use crate::test_utils::CapturedLogs;

    struct StaticFeed(Vec<Article>);

    #[async_trait]
    impl FeedSource for StaticFeed {
        async fn latest_articles(&self, _feed_url: &str, _since: LastChecked) -> Vec<Article> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct RecordingCaptions {
        titles: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl CaptionGenerator for RecordingCaptions {
        async fn generate(&self, title: &str, _summary: &str, link: &str) -> Result<Caption> {
            self.titles.lock().unwrap().push(title.to_string());
            if self.fail {
                return Err(FeedcasterError::Completion("quota exceeded".into()));
            }
            Ok(Caption(format!("Caption text {}", link)))
        }
    }

    struct FixedThumbnail {
        image: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    impl FixedThumbnail {
        fn new(image: Option<&str>) -> Self {
            Self {
                image: image.map(String::from),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ThumbnailResolver for FixedThumbnail {
        async fn resolve(&self, article_url: &str) -> Result<Option<String>> {
            self.calls.lock().unwrap().push(article_url.to_string());
            Ok(self.image.clone())
        }
    }

    #[derive(Default)]
    struct CountingPublisher {
        calls: AtomicUsize,
        last: Mutex<Option<(String, String)>>,
    }

    #[async_trait]
    impl Publisher for CountingPublisher {
        async fn publish(&self, image_url: &str, caption: &str) -> Result<PublishOutcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some((image_url.to_string(), caption.to_string()));
            Ok(PublishOutcome::Published {
                creation_id: "123".into(),
            })
        }
    }

    fn articles(n: usize) -> Vec<Article> {
        (1..=n)
            .map(|i| Article::new(format!("T{}", i), format!("https://a/{}", i)).with_summary("S"))
            .collect()
    }

    struct Harness {
        captions: Arc<RecordingCaptions>,
        thumbnails: Arc<FixedThumbnail>,
        publisher: Arc<CountingPublisher>,
        workflow: Workflow,
    }

    fn harness(feed: Vec<Article>, image: Option<&str>, caption_fails: bool) -> Harness {
        let captions = Arc::new(RecordingCaptions {
            fail: caption_fails,
            ..Default::default()
        });
        let thumbnails = Arc::new(FixedThumbnail::new(image));
        let publisher = Arc::new(CountingPublisher::default());
        let workflow = Workflow::new(
            "https://example.com/feed.xml",
            Arc::new(StaticFeed(feed)),
            captions.clone(),
            thumbnails.clone(),
            publisher.clone(),
        );
        Harness {
            captions,
            thumbnails,
            publisher,
            workflow,
        }
    }

    #[tokio::test]
    async fn test_only_first_article_is_processed() {
        let h = harness(articles(5), Some("https://a/img.jpg"), false);

        let report = h.workflow.run(LastChecked::now()).await.unwrap();

        assert!(matches!(report.outcome, RunOutcome::Publish(PublishOutcome::Published { .. })));
        assert_eq!(*h.captions.titles.lock().unwrap(), vec!["T1".to_string()]);
        assert_eq!(*h.thumbnails.calls.lock().unwrap(), vec!["https://a/1".to_string()]);
        assert_eq!(h.publisher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_thumbnail_skips_publisher() {
        let (logs, _guard) = CapturedLogs::install();
        let h = harness(articles(3), None, false);

        let report = h.workflow.run(LastChecked::now()).await.unwrap();

        assert_eq!(logs.count("No thumbnail found for article: T1"), 1);
        assert_eq!(logs.count("No thumbnail found for article: T2"), 0);

        assert_eq!(report.outcome, RunOutcome::NoThumbnail { title: "T1".into() });
        assert_eq!(h.publisher.calls.load(Ordering::SeqCst), 0);
        // No fallback to the next article either
        assert_eq!(h.captions.titles.lock().unwrap().len(), 1);
        assert_eq!(h.thumbnails.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_feed() {
        let h = harness(Vec::new(), Some("https://a/img.jpg"), false);

        let report = h.workflow.run(LastChecked::now()).await.unwrap();

        assert_eq!(report.outcome, RunOutcome::NoArticles);
        assert!(h.captions.titles.lock().unwrap().is_empty());
        assert_eq!(h.publisher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_caption_failure_aborts_run() {
        let h = harness(articles(2), Some("https://a/img.jpg"), true);

        let err = h.workflow.run(LastChecked::now()).await.unwrap_err();

        assert!(matches!(err, FeedcasterError::Completion(_)));
        assert!(h.thumbnails.calls.lock().unwrap().is_empty());
        assert_eq!(h.publisher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_publisher_receives_image_and_caption() {
        let feed = vec![Article::new("T", "https://a/b").with_summary("S")];
        let h = harness(feed, Some("https://a/img.jpg"), false);

        h.workflow.run(LastChecked::now()).await.unwrap();

        let last = h.publisher.last.lock().unwrap().clone();
        assert_eq!(
            last,
            Some(("https://a/img.jpg".to_string(), "Caption text https://a/b".to_string()))
        );
    }

    #[tokio::test]
    async fn test_dry_run_does_not_publish() {
        let h = harness(articles(1), Some("https://a/img.jpg"), false);
        let workflow = h.workflow.dry_run(true);

        let report = workflow.run(LastChecked::now()).await.unwrap();

        match report.outcome {
            RunOutcome::DryRun {
                article,
                caption,
                image_url,
            } => {
                assert_eq!(article.title, "T1");
                assert_eq!(caption.as_str(), "Caption text https://a/1");
                assert_eq!(image_url, "https://a/img.jpg");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(h.publisher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_last_checked_moves_forward() {
        let h = harness(articles(1), None, false);
        let before = LastChecked::now();

        let report = h.workflow.run(before).await.unwrap();
        assert!(report.last_checked >= before);
    }
}
