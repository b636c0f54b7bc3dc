//! # Feedcaster
//!
//! Posts the newest article of an RSS/Atom feed to Instagram, with a caption
//! written by a language model.
//!
//! ## Architecture
//!
//! One run is a straight pipeline over the first feed entry:
//!
//! ```text
//! Feed → Caption → Thumbnail → Publish
//! ```
//!
//! - [`feed`]: fetches and parses the feed into [`Article`](domain::Article)s
//! - [`caption`]: asks a chat-completions endpoint for post text
//! - [`thumbnail`]: pulls the `og:image` URL from the article page
//! - [`publish`]: creates and publishes a media container via the Graph API
//! - [`workflow`]: drives the steps above, once per invocation
//!
//! ## Quick Start
//!
//! ```bash
//! export OPENAI_API_KEY=... IG_ACCESS_TOKEN=... IG_ACCOUNT_ID=...
//!
//! # Post the newest BBC News article
//! feedcaster
//!
//! # Try another feed without posting anything
//! feedcaster --feed-url https://blog.rust-lang.org/feed.xml --dry-run
//! ```
//!
//! Scheduling is left to cron or a similar trigger.

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires every component onto one
/// shared transport.
pub mod app;

/// Configuration file and environment secrets.
///
/// Loads from `~/.config/feedcaster/config.toml`; credentials come from
/// `OPENAI_API_KEY`, `IG_ACCESS_TOKEN` and `IG_ACCOUNT_ID`.
pub mod config;

/// Command-line flags using clap.
pub mod cli;

/// Core domain models: [`Article`](domain::Article), [`Caption`](domain::Caption)
/// and [`LastChecked`](domain::LastChecked).
pub mod domain;

/// Outbound HTTP.
///
/// - [`Transport`](transport::Transport): async trait every component sends through
/// - [`HttpTransport`](transport::HttpTransport): reqwest-based implementation
/// - [`RetryingTransport`](transport::RetryingTransport): bounded backoff for idempotent calls
pub mod transport;

/// Feed Reader.
pub mod feed;

/// Caption Generator.
pub mod caption;

/// Thumbnail Resolver.
pub mod thumbnail;

/// Publisher.
pub mod publish;

/// Workflow Driver.
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_utils;
