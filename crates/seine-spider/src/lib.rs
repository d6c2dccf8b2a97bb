//! # Seine Spider
//!
//! Bounded breadth-first crawler. The spider owns no I/O of its own: pages
//! arrive through the [`Fetcher`] port, content through the
//! [`HtmlExtractor`] port, and everything it learns lands in an
//! [`IndexSession`] that commits once, when the crawl ends.
//!
//! The loop is deliberately serial. Fetches and store reads are the only
//! suspension points, and all index state is written by this one task, so a
//! crawl is a single cooperative session over the store.

use anyhow::{Context, Result};
use seine_index::{Analyzer, IndexSession, IndexStore};
use seine_types::{Fetcher, HtmlExtractor};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

#[cfg(test)]
mod tests;

/// Outcome of one crawl session.
#[derive(Debug, Clone, Copy)]
pub struct CrawlSummary {
    /// Documents indexed (and DocIds consumed) by this session.
    pub pages_indexed: usize,
    /// Link edges recorded, counting duplicates once per occurrence.
    pub edges_recorded: usize,
    pub elapsed: Duration,
}

/// Breadth-first crawler over pluggable fetch and extraction capabilities.
pub struct Spider {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn HtmlExtractor>,
    analyzer: Analyzer,
}

impl Spider {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn HtmlExtractor>,
        analyzer: Analyzer,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            analyzer,
        }
    }

    /// Expand a bounded BFS from `seed` until the frontier empties or
    /// `max_pages` documents have been indexed this session, then commit.
    ///
    /// Pages that fail to fetch are skipped and consume no document
    /// identifier; URLs already indexed by an earlier crawl are skipped
    /// outright, which makes re-crawling a covered seed a no-op.
    pub async fn crawl(
        &self,
        store: &IndexStore,
        seed: Url,
        max_pages: usize,
    ) -> Result<CrawlSummary> {
        let started = Instant::now();
        info!(seed = %seed, max_pages, "starting crawl");

        let mut session =
            IndexSession::begin(store, &self.analyzer).context("failed to start index session")?;

        let mut frontier = VecDeque::new();
        let mut visited = HashSet::new();
        visited.insert(seed.as_str().to_owned());
        frontier.push_back(seed);

        let mut edges_recorded = 0usize;

        while session.pages_indexed() < max_pages {
            let Some(url) = frontier.pop_front() else {
                break;
            };

            if session
                .contains_url(url.as_str())
                .context("failed to consult the URL map")?
            {
                debug!(url = %url, "already indexed, skipping");
                continue;
            }

            let page = match self.fetcher.fetch(&url).await {
                Ok(page) => page,
                Err(error) => {
                    debug!(url = %url, %error, "page unavailable, skipping");
                    continue;
                }
            };

            let doc_id = session.allocate(url.as_str());
            debug!(url = %url, %doc_id, "indexing page");

            for link in self.extractor.extract_links(&page.body, &url) {
                if !matches!(link.scheme(), "http" | "https") {
                    continue;
                }
                let child = link.as_str().to_owned();
                if visited.insert(child.clone()) {
                    frontier.push_back(link);
                }
                session.record_edge(doc_id, &child);
                edges_recorded += 1;
            }

            if let Some(title) = self.extractor.extract_title(&page.body) {
                session.record_title(doc_id, &title);
            }
            if let Some(text) = self.extractor.extract_text(&page.body) {
                session.index_body(doc_id, &text);
            }
        }

        let pages_indexed = session.pages_indexed();
        session.commit().context("failed to commit crawl session")?;

        let summary = CrawlSummary {
            pages_indexed,
            edges_recorded,
            elapsed: started.elapsed(),
        };
        info!(
            pages = summary.pages_indexed,
            edges = summary.edges_recorded,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "crawl finished"
        );
        Ok(summary)
    }
}
