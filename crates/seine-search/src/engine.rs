//! The query-side facade: parse, gate, score, assemble.

use crate::phrase;
use crate::query;
use crate::results::{self, SearchHit};
use crate::score::Scorer;
use seine_index::{Analyzer, IndexStore, PostingMap, Result};
use seine_types::{DocId, Fetcher};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Ranked results returned per query.
pub const MAX_RESULTS: usize = 50;

/// Retrieval engine over one [`IndexStore`].
///
/// Every query runs against the snapshot committed most recently at query
/// start; crawls committing concurrently become visible to the next query.
pub struct SearchEngine {
    store: IndexStore,
    analyzer: Analyzer,
    fetcher: Option<Arc<dyn Fetcher>>,
}

impl SearchEngine {
    pub fn new(store: IndexStore, analyzer: Analyzer) -> Self {
        Self {
            store,
            analyzer,
            fetcher: None,
        }
    }

    /// Attach a fetcher used to resolve live last-modified dates and sizes
    /// for result rows. Without one, those fields keep their defaults.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Execute a free-text query and return the ranked results.
    pub async fn search(&self, raw_query: &str) -> Result<Vec<SearchHit>> {
        let phrases = query::parse(raw_query, &self.analyzer);
        if phrases.is_empty() {
            return Ok(Vec::new());
        }
        debug!(query = raw_query, phrases = phrases.len(), "executing query");

        let mut hits = {
            let rtxn = self.store.read_txn()?;

            // Load the posting map of every term the query mentions.
            let mut term_postings: HashMap<String, PostingMap> = HashMap::new();
            for stem in phrases.iter().flatten() {
                if !term_postings.contains_key(stem) {
                    let map = self.store.postings.get(&rtxn, stem)?.unwrap_or_default();
                    term_postings.insert(stem.clone(), map);
                }
            }

            // A document must pass the gate for every phrase.
            let mut candidates: Option<BTreeSet<DocId>> = None;
            for p in &phrases {
                let matched = phrase::matching_docs(p, &term_postings);
                candidates = Some(match candidates {
                    None => matched,
                    Some(acc) => acc.intersection(&matched).copied().collect(),
                });
                if candidates.as_ref().is_some_and(BTreeSet::is_empty) {
                    break;
                }
            }
            let candidates = candidates.unwrap_or_default();

            // Sum per-phrase cosine similarities over the surviving docs.
            let mut scorer = Scorer::new(&self.store, &rtxn)?;
            let mut scored = Vec::with_capacity(candidates.len());
            for doc_id in candidates {
                let mut score = 0.0;
                for p in &phrases {
                    score += scorer.phrase_score(p, doc_id)?;
                }
                scored.push((doc_id, score));
            }
            scored.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.cmp(&b.0))
            });
            scored.truncate(MAX_RESULTS);

            results::assemble(&self.store, &rtxn, &scored)?
            // rtxn ends here; nothing store-side is held across awaits.
        };

        if let Some(fetcher) = &self.fetcher {
            results::resolve_live_metadata(fetcher.as_ref(), &mut hits).await;
        }

        debug!(results = hits.len(), "query finished");
        Ok(hits)
    }
}
