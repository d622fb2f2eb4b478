//! Streaming RSS title extraction.
//!
//! The response body is fed straight into a quick-xml reader; parsing stops as
//! soon as `max_count` entries are collected, so a huge feed costs no more than
//! its first few items.

use dashb_core::{FeedParseError, HttpJsonClient, TitlePolicyKind};
use futures::TryStreamExt;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tokio::io::AsyncBufRead;
use tokio_util::io::StreamReader;
use tracing::instrument;
use url::Url;

use crate::types::NewsError;

/// Which `<title>` inside an `<item>` names the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitlePolicy {
    /// The `<title>` that is a direct child of `<item>`; nested titles and the
    /// channel title are ignored.
    Position,
    /// The first `<title>` at any depth inside `<item>` whose text does not
    /// contain `excluded` (case-insensitive). Skips feed-name titles
    /// that some feeds repeat ahead of the real headline.
    FilteredFirst { excluded: String },
}

impl TitlePolicy {
    pub fn from_kind(kind: TitlePolicyKind, excluded: &str) -> Self {
        match kind {
            TitlePolicyKind::Position => TitlePolicy::Position,
            TitlePolicyKind::FilteredFirst => TitlePolicy::FilteredFirst {
                excluded: excluded.to_string(),
            },
        }
    }

    fn considers(&self, item_depth: usize, title_depth: usize) -> bool {
        match self {
            TitlePolicy::Position => title_depth == item_depth + 1,
            TitlePolicy::FilteredFirst { .. } => title_depth > item_depth,
        }
    }

    fn accepts(&self, title: &str) -> bool {
        match self {
            TitlePolicy::Position => true,
            TitlePolicy::FilteredFirst { excluded } => {
                let needle = excluded.trim();
                needle.is_empty() || !title.to_lowercase().contains(&needle.to_lowercase())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
}

/// Fetches an RSS document and extracts item titles.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: HttpJsonClient,
}

impl FeedClient {
    pub fn new(http: HttpJsonClient) -> Self {
        Self { http }
    }

    /// Download `url` and return up to `max_count` titled entries in document
    /// order. The body is consumed only as far as needed.
    #[instrument(skip(self, policy), fields(url = %url), level = "info")]
    pub async fn get_entries(
        &self,
        url: &Url,
        max_count: usize,
        policy: &TitlePolicy,
    ) -> Result<Vec<FeedEntry>, NewsError> {
        let response = self.http.get_response(url).await?;

        let body = response.bytes_stream().map_err(std::io::Error::other);
        let reader = StreamReader::new(Box::pin(body));

        let entries = read_entries(reader, max_count, policy).await?;
        tracing::debug!("Read {} feed entries", entries.len());
        Ok(entries)
    }
}

/// Pull-parse an RSS document from `source`.
///
/// Blank titles and items without an acceptable title are skipped. Returns
/// [`FeedParseError`] for malformed XML, a document without a root element, or
/// a document that ends inside an open element before `max_count` was reached.
pub async fn read_entries<R>(
    source: R,
    max_count: usize,
    policy: &TitlePolicy,
) -> Result<Vec<FeedEntry>, FeedParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut entries = Vec::new();
    if max_count == 0 {
        return Ok(entries);
    }

    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();

    let mut open: Vec<String> = Vec::new();
    let mut seen_root = false;
    let mut item_depth: Option<usize> = None;
    let mut title_depth: Option<usize> = None;
    let mut title_text = String::new();
    let mut chosen: Option<String> = None;

    loop {
        match reader.read_event_into_async(&mut buf).await {
            Ok(Event::Start(e)) => {
                seen_root = true;
                open.push(local_name(&e));
                let depth = open.len();

                if is_named(&e, b"item") {
                    if item_depth.is_none() {
                        item_depth = Some(depth);
                        chosen = None;
                    }
                } else if is_named(&e, b"title") {
                    if let Some(item) = item_depth {
                        if chosen.is_none()
                            && title_depth.is_none()
                            && policy.considers(item, depth)
                        {
                            title_depth = Some(depth);
                            title_text.clear();
                        }
                    }
                }
            }
            Ok(Event::Empty(_)) => seen_root = true,
            Ok(Event::Text(t)) => {
                if title_depth.is_some() {
                    match t.unescape() {
                        Ok(text) => title_text.push_str(&text),
                        Err(e) => {
                            tracing::debug!("Keeping raw title text after unescape error: {}", e);
                            title_text.push_str(&String::from_utf8_lossy(&t));
                        }
                    }
                }
            }
            Ok(Event::CData(c)) => {
                if title_depth.is_some() {
                    title_text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Ok(Event::End(_)) => {
                let depth = open.len();

                if title_depth == Some(depth) {
                    title_depth = None;
                    let title = title_text.trim();
                    if !title.is_empty() && policy.accepts(title) {
                        chosen = Some(title.to_string());
                    }
                }

                if item_depth == Some(depth) {
                    item_depth = None;
                    if let Some(title) = chosen.take() {
                        entries.push(FeedEntry { title });
                        if entries.len() >= max_count {
                            return Ok(entries);
                        }
                    }
                }

                open.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(quick_xml::Error::Io(e)) => return Err(FeedParseError::Io(e.to_string())),
            Err(e) => {
                return Err(FeedParseError::Malformed(format!(
                    "{} at byte {}",
                    e,
                    reader.buffer_position()
                )))
            }
        }
        buf.clear();
    }

    if !seen_root {
        return Err(FeedParseError::EmptyDocument);
    }
    if let Some(name) = open.last() {
        return Err(FeedParseError::UnexpectedEof(name.clone()));
    }

    Ok(entries)
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn is_named(e: &BytesStart<'_>, name: &[u8]) -> bool {
    e.local_name().as_ref().eq_ignore_ascii_case(name)
}
