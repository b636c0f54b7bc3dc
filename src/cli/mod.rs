use std::path::PathBuf;

use clap::Parser;

/// Every flag is optional; a bare invocation posts the newest article of the
/// configured feed.
#[derive(Parser, Debug)]
#[command(name = "feedcaster")]
#[command(about = "Post the newest article of an RSS feed to Instagram", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/feedcaster/config.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Feed to read, overriding the config file
    #[arg(short, long)]
    pub feed_url: Option<String>,

    /// Generate the caption and find the image, but do not publish
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Reject an override that is not an absolute URL before any request goes out.
    pub fn validated_feed_url(&self) -> Result<Option<String>, url::ParseError> {
        self.feed_url
            .as_deref()
            .map(|raw| url::Url::parse(raw).map(|_| raw.to_string()))
            .transpose()
    }
}
