pub mod http;
pub mod retry;

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::app::Result;

pub use http::HttpTransport;
pub use retry::{RetryConfig, RetryingTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    Json(serde_json::Value),
}

/// A single outbound request.
///
/// GETs are marked retryable by default, POSTs are not; callers opt a POST in
/// with [`Request::retryable`] when repeating it has no visible side effect.
#[derive(Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub body: Body,
    pub bearer: Option<String>,
    pub retryable: bool,
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("bearer", &self.bearer.as_deref().map(|_| "<redacted>"))
            .field("retryable", &self.retryable)
            .finish_non_exhaustive()
    }
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: Body::Empty,
            bearer: None,
            retryable: true,
        }
    }

    pub fn post_form<K, V>(url: impl Into<String>, form: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            method: Method::Post,
            url: url.into(),
            body: Body::Form(form.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
            bearer: None,
            retryable: false,
        }
    }

    pub fn post_json(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            body: Body::Json(body),
            bearer: None,
            retryable: false,
        }
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    /// Look up a form field by name
    pub fn form_value(&self, key: &str) -> Option<&str> {
        match &self.body {
            Body::Form(fields) => fields
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }
}

/// Status and body of a completed exchange, whatever the status code.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Sends requests and hands back the raw response.
///
/// Only failures to complete the exchange (DNS, connect, timeout) are errors;
/// non-2xx statuses are returned as ordinary responses for the caller to judge.
#[async_trait]
pub trait Transport {
    async fn send(&self, request: Request) -> Result<Response>;
}
