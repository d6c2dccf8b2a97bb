//! Result assembly: from ranked DocIds to presentable records.

use chrono::{DateTime, Utc};
use seine_index::heed::RoTxn;
use seine_index::{IndexStore, Result};
use seine_types::{DocId, Fetcher};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

/// Keywords shown per result.
pub const MAX_KEYWORDS: usize = 5;

/// Parent and child links shown per result.
pub const MAX_NEIGHBOR_LINKS: usize = 10;

const UNTITLED: &str = "Untitled";

/// One term of a result's keyword list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyword {
    pub term: String,
    pub frequency: u32,
}

/// A ranked search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub url: String,
    pub title: String,
    /// Live last-modified date, when the origin answered the probe.
    pub last_modified: Option<DateTime<Utc>>,
    /// Live content length in bytes; zero when unknown.
    pub size: u64,
    /// Most frequent terms of the document, frequency-descending.
    pub keywords: Vec<Keyword>,
    pub parent_links: Vec<String>,
    pub child_links: Vec<String>,
    pub score: f64,
    /// `round(score * 100)` clamped to `0..=100`.
    pub normalized_score: u8,
}

impl SearchHit {
    /// Keyword list as `term(freq), term(freq), ...`.
    pub fn keywords_display(&self) -> String {
        self.keywords
            .iter()
            .map(|k| format!("{}({})", k.term, k.frequency))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Build hits for the scored documents from one snapshot. Live metadata is
/// left at its defaults; [`resolve_live_metadata`] fills it in afterwards so
/// no transaction outlives this call.
pub fn assemble(
    store: &IndexStore,
    rtxn: &RoTxn,
    scored: &[(DocId, f64)],
) -> Result<Vec<SearchHit>> {
    // Reverse DocId → URL map, built once per query session.
    let mut doc_urls: HashMap<DocId, String> = HashMap::new();
    for pair in store.urls.iter(rtxn)? {
        let (url, doc_id) = pair?;
        doc_urls.insert(doc_id, url.to_owned());
    }

    let mut hits = Vec::with_capacity(scored.len());
    for &(doc_id, score) in scored {
        let Some(url) = doc_urls.get(&doc_id) else {
            debug!(%doc_id, "scored document missing from the URL map, dropping");
            continue;
        };

        let title = store
            .titles
            .get(rtxn, doc_id)?
            .unwrap_or_else(|| UNTITLED.to_owned());

        let mut keywords: Vec<Keyword> = store
            .doc_terms
            .get(rtxn, doc_id)?
            .unwrap_or_default()
            .into_iter()
            .map(|(term, frequency)| Keyword { term, frequency })
            .collect();
        keywords.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| a.term.cmp(&b.term))
        });
        keywords.truncate(MAX_KEYWORDS);

        let child_links = store.links.children(rtxn, doc_id, MAX_NEIGHBOR_LINKS)?;

        hits.push(SearchHit {
            doc_id,
            url: url.clone(),
            title,
            last_modified: None,
            size: 0,
            keywords,
            parent_links: Vec::new(),
            child_links,
            score,
            normalized_score: normalize_score(score),
        });
    }

    fill_parent_links(store, rtxn, &doc_urls, &mut hits)?;
    Ok(hits)
}

/// Parent links: one pass over the edge map, matching edges whose child URL
/// is one of the hit URLs.
fn fill_parent_links(
    store: &IndexStore,
    rtxn: &RoTxn,
    doc_urls: &HashMap<DocId, String>,
    hits: &mut [SearchHit],
) -> Result<()> {
    let mut by_url: HashMap<&str, usize> = HashMap::new();
    for (index, hit) in hits.iter().enumerate() {
        by_url.insert(hit.url.as_str(), index);
    }
    if by_url.is_empty() {
        return Ok(());
    }

    let mut parents: Vec<Vec<String>> = vec![Vec::new(); hits.len()];
    for entry in store.links.iter(rtxn)? {
        let ((parent, child), ()) = entry?;
        let Some(&index) = by_url.get(child) else {
            continue;
        };
        if parents[index].len() >= MAX_NEIGHBOR_LINKS {
            continue;
        }
        if let Some(parent_url) = doc_urls.get(&parent) {
            parents[index].push(parent_url.clone());
        }
    }

    for (hit, parent_links) in hits.iter_mut().zip(parents) {
        hit.parent_links = parent_links;
    }
    Ok(())
}

/// Best-effort HEAD probes against the live origin for each hit.
pub async fn resolve_live_metadata(fetcher: &dyn Fetcher, hits: &mut [SearchHit]) {
    for hit in hits.iter_mut() {
        let Ok(url) = Url::parse(&hit.url) else {
            continue;
        };
        if let Some(probe) = fetcher.probe(&url).await {
            hit.last_modified = probe.last_modified;
            hit.size = probe.content_length.unwrap_or(0);
        }
    }
}

fn normalize_score(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}
