//! TF-IDF vector-space scoring with title boosting.
//!
//! Document weights follow `(tf / max_tf) · ln(N / df) · boost`, where the
//! boost is [`TITLE_BOOST`] whenever the lower-cased title contains the term
//! as a substring. Query vectors use the same shape without the boost, and
//! a phrase contributes the cosine similarity between its query vector and
//! the document vector. Document norms range over every term the document
//! contains; query norms over the query's own terms.

use crate::query::Phrase;
use seine_index::heed::RoTxn;
use seine_index::{IndexStore, Result};
use seine_types::DocId;
use std::collections::HashMap;

/// Multiplier applied to a document-vector weight when the term occurs in
/// the document title.
pub const TITLE_BOOST: f64 = 1.5;

/// Precomputed vector data for one candidate document.
struct DocVector {
    weights: HashMap<String, f64>,
    norm: f64,
}

/// Scoring context over one store snapshot. Caches document frequencies and
/// document vectors across the phrases and candidates of a single query.
pub struct Scorer<'a> {
    store: &'a IndexStore,
    rtxn: &'a RoTxn<'a>,
    doc_count: u64,
    df_cache: HashMap<String, u64>,
    doc_cache: HashMap<DocId, DocVector>,
}

impl<'a> Scorer<'a> {
    pub fn new(store: &'a IndexStore, rtxn: &'a RoTxn<'a>) -> Result<Self> {
        let doc_count = store.doc_count(rtxn)?;
        Ok(Self {
            store,
            rtxn,
            doc_count,
            df_cache: HashMap::new(),
            doc_cache: HashMap::new(),
        })
    }

    /// `ln(N / df)`, or `None` for terms never seen at index time.
    fn idf(&mut self, term: &str) -> Result<Option<f64>> {
        let df = match self.df_cache.get(term) {
            Some(&df) => df,
            None => {
                let df = self.store.postings.doc_frequency(self.rtxn, term)?;
                self.df_cache.insert(term.to_owned(), df);
                df
            }
        };
        if df == 0 || self.doc_count == 0 {
            return Ok(None);
        }
        Ok(Some((self.doc_count as f64 / df as f64).ln()))
    }

    fn ensure_doc_vector(&mut self, doc_id: DocId) -> Result<()> {
        if self.doc_cache.contains_key(&doc_id) {
            return Ok(());
        }

        let frequencies = self
            .store
            .doc_terms
            .get(self.rtxn, doc_id)?
            .unwrap_or_default();
        let max_tf = frequencies.values().copied().max().unwrap_or(0);
        let title = self
            .store
            .titles
            .get(self.rtxn, doc_id)?
            .unwrap_or_default()
            .to_lowercase();

        let mut weights = HashMap::with_capacity(frequencies.len());
        let mut norm_squared = 0.0;
        if max_tf > 0 {
            for (term, tf) in &frequencies {
                let Some(idf) = self.idf(term)? else {
                    continue;
                };
                let boost = if title.contains(term.as_str()) {
                    TITLE_BOOST
                } else {
                    1.0
                };
                let weight = (*tf as f64 / max_tf as f64) * idf * boost;
                norm_squared += weight * weight;
                weights.insert(term.clone(), weight);
            }
        }

        self.doc_cache.insert(
            doc_id,
            DocVector {
                weights,
                norm: norm_squared.sqrt(),
            },
        );
        Ok(())
    }

    /// Cosine similarity between one phrase's query vector and a document.
    pub fn phrase_score(&mut self, phrase: &Phrase, doc_id: DocId) -> Result<f64> {
        let mut term_counts: HashMap<&str, u32> = HashMap::new();
        for stem in phrase {
            *term_counts.entry(stem.as_str()).or_insert(0) += 1;
        }
        let max_tf = term_counts.values().copied().max().unwrap_or(0);
        if max_tf == 0 {
            return Ok(0.0);
        }

        let mut query_weights = Vec::with_capacity(term_counts.len());
        let mut query_norm_squared = 0.0;
        for (term, tf) in term_counts {
            let Some(idf) = self.idf(term)? else {
                continue;
            };
            let weight = (tf as f64 / max_tf as f64) * idf;
            query_norm_squared += weight * weight;
            query_weights.push((term.to_owned(), weight));
        }
        let query_norm = query_norm_squared.sqrt();
        if query_norm == 0.0 {
            return Ok(0.0);
        }

        self.ensure_doc_vector(doc_id)?;
        let doc = &self.doc_cache[&doc_id];
        if doc.norm == 0.0 {
            return Ok(0.0);
        }

        let dot: f64 = query_weights
            .iter()
            .map(|(term, weight)| weight * doc.weights.get(term).copied().unwrap_or(0.0))
            .sum();
        Ok(dot / (query_norm * doc.norm))
    }
}
