use dashb_core::{FeedParseError, NetworkError};
use serde::{Deserialize, Serialize};

/// One headline as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsHeadline {
    pub title: String,
    pub source: String,
}

/// Ordered headlines from one feed, replaced wholesale on each successful fetch.
pub type NewsFeed = Vec<NewsHeadline>;

/// News source errors
#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
    #[error("Feed parse error: {0}")]
    FeedParse(#[from] FeedParseError),
}
