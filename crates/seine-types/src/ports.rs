//! Port traits decoupling the crawl pipeline from its collaborators.
//!
//! The spider works with ANY fetcher or extractor implementation; tests use
//! in-memory fakes, production wires `seine-fetch` and `seine-html`.

use crate::errors::FetchError;
use crate::types::{FetchedPage, PageProbe};
use async_trait::async_trait;
use url::Url;

/// HTTP retrieval capability.
///
/// Implementations must apply their own timeouts and redirect policy; the
/// crawler never retries and interprets any `Err` as "page unavailable".
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a page body with its response metadata.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;

    /// Best-effort metadata probe (HEAD). Used when resolving result rows
    /// and report entries live; failures are absorbed into `None`.
    async fn probe(&self, url: &Url) -> Option<PageProbe> {
        let _ = url;
        None
    }
}

/// HTML extraction capability.
///
/// Methods return `Option`/`Vec` rather than `Result`: a page the extractor
/// cannot make sense of simply yields nothing, and invalid link targets are
/// silently skipped.
pub trait HtmlExtractor: Send + Sync {
    /// The `<title>` text, trimmed; `None` when absent or empty.
    fn extract_title(&self, html: &str) -> Option<String>;

    /// Visible body text with scripts and styles removed, whitespace
    /// normalized to single spaces; `None` when nothing remains.
    fn extract_text(&self, html: &str) -> Option<String>;

    /// Outbound links resolved against `base_url`. Unresolvable hrefs are
    /// dropped; scheme filtering is the caller's concern.
    fn extract_links(&self, html: &str, base_url: &Url) -> Vec<Url>;
}
