use chrono::{DateTime, Utc};

/// Moment the feed was last polled.
///
/// Threaded into and out of each workflow run. It is handed to the feed reader
/// but does not filter entries: every run looks at the feed from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LastChecked(pub DateTime<Utc>);

impl LastChecked {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.0
    }
}
