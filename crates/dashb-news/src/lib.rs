//! Headline source for DashB
//!
//! Streams an RSS document and keeps only the first few item titles.

pub mod feed;
pub mod service;
pub mod types;

pub use feed::{read_entries, FeedClient, FeedEntry, TitlePolicy};
pub use service::{NewsService, NewsSource};
pub use types::*;
