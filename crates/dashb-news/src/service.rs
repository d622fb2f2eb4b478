use async_trait::async_trait;
use dashb_core::http::parse_url;
use dashb_core::{Config, HttpJsonClient};
use url::Url;

use crate::feed::{FeedClient, TitlePolicy};
use crate::types::{NewsError, NewsFeed, NewsHeadline};

/// Anything that can produce the current headline list.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_headlines(&self) -> Result<NewsFeed, NewsError>;
}

/// A single RSS feed with a fixed cap, title policy and source label.
#[derive(Debug, Clone)]
pub struct NewsService {
    feed: FeedClient,
    url: Url,
    max_items: usize,
    policy: TitlePolicy,
    source_label: String,
}

impl NewsService {
    pub fn from_config(config: &Config, http: HttpJsonClient) -> Result<Self, NewsError> {
        let variant = config.dashboard.variant;
        let news = &config.news;
        Ok(Self {
            feed: FeedClient::new(http),
            url: parse_url(&news.feed_url)?,
            max_items: news.effective_max_items(variant),
            policy: TitlePolicy::from_kind(
                news.effective_title_policy(variant),
                &news.excluded_title,
            ),
            source_label: news.source_label.clone(),
        })
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn policy(&self) -> &TitlePolicy {
        &self.policy
    }
}

#[async_trait]
impl NewsSource for NewsService {
    async fn fetch_headlines(&self) -> Result<NewsFeed, NewsError> {
        let entries = self
            .feed
            .get_entries(&self.url, self.max_items, &self.policy)
            .await?;

        let headlines: NewsFeed = entries
            .into_iter()
            .map(|entry| NewsHeadline {
                title: entry.title,
                source: self.source_label.clone(),
            })
            .collect();

        tracing::info!("Fetched {} headlines from {}", headlines.len(), self.source_label);
        Ok(headlines)
    }
}
