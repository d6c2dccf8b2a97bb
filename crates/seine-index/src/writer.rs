//! The index write session used by the crawler.
//!
//! A session buffers everything one crawl produces (document identifiers,
//! titles, posting deltas, per-document term frequencies, link edges) and
//! makes it durable in a single commit. Dropping a session without
//! committing leaves the store exactly as it was, including the document
//! counter.

use crate::analyzer::Analyzer;
use crate::error::Result;
use crate::store::{IndexStore, PostingMap, TermFrequencies};
use seine_types::DocId;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

pub struct IndexSession<'a> {
    store: &'a IndexStore,
    analyzer: &'a Analyzer,
    next_doc_id: u32,
    urls: Vec<(String, DocId)>,
    session_urls: HashSet<String>,
    titles: Vec<(DocId, String)>,
    postings: BTreeMap<String, PostingMap>,
    doc_terms: HashMap<DocId, TermFrequencies>,
    edges: Vec<(DocId, String)>,
}

impl<'a> IndexSession<'a> {
    /// Start a session against the last committed state of the store.
    pub fn begin(store: &'a IndexStore, analyzer: &'a Analyzer) -> Result<Self> {
        let rtxn = store.read_txn()?;
        let next_doc_id = store.main.last_page_id(&rtxn)?;
        drop(rtxn);
        debug!(next_doc_id, "index session started");

        Ok(Self {
            store,
            analyzer,
            next_doc_id,
            urls: Vec::new(),
            session_urls: HashSet::new(),
            titles: Vec::new(),
            postings: BTreeMap::new(),
            doc_terms: HashMap::new(),
            edges: Vec::new(),
        })
    }

    /// Whether a URL is already known, either committed by an earlier crawl
    /// or allocated within this session.
    pub fn contains_url(&self, url: &str) -> Result<bool> {
        if self.session_urls.contains(url) {
            return Ok(true);
        }
        let rtxn = self.store.read_txn()?;
        Ok(self.store.urls.get(&rtxn, url)?.is_some())
    }

    /// Assign the next dense document identifier to `url`.
    pub fn allocate(&mut self, url: &str) -> DocId {
        let doc_id = DocId(self.next_doc_id);
        self.next_doc_id += 1;
        self.urls.push((url.to_owned(), doc_id));
        self.session_urls.insert(url.to_owned());
        doc_id
    }

    /// Record a title; empty titles are not stored.
    pub fn record_title(&mut self, doc_id: DocId, title: &str) {
        if !title.is_empty() {
            self.titles.push((doc_id, title.to_owned()));
        }
    }

    /// Analyze a document body and buffer its postings.
    pub fn index_body(&mut self, doc_id: DocId, body: &str) {
        for (position, stem) in self.analyzer.analyze(body) {
            self.postings
                .entry(stem.clone())
                .or_default()
                .entry(doc_id)
                .or_default()
                .record(position);
            *self
                .doc_terms
                .entry(doc_id)
                .or_default()
                .entry(stem)
                .or_insert(0) += 1;
        }
    }

    /// Record a link-graph edge. The child URL need not be indexed.
    pub fn record_edge(&mut self, parent: DocId, child_url: &str) {
        self.edges.push((parent, child_url.to_owned()));
    }

    /// Documents allocated by this session so far.
    pub fn pages_indexed(&self) -> usize {
        self.urls.len()
    }

    /// Write everything buffered by this session in one transaction.
    pub fn commit(self) -> Result<()> {
        let mut wtxn = self.store.write_txn()?;

        for (url, doc_id) in &self.urls {
            self.store.urls.put(&mut wtxn, url, *doc_id)?;
        }
        for (doc_id, title) in &self.titles {
            self.store.titles.put(&mut wtxn, *doc_id, title)?;
        }
        for (term, fresh) in &self.postings {
            // Documents are new to this session, so merging is insertion
            // into whatever posting map earlier crawls left behind.
            let mut merged = self.store.postings.get(&wtxn, term)?.unwrap_or_default();
            for (doc_id, posting) in fresh {
                merged.insert(*doc_id, posting.clone());
            }
            self.store.postings.put(&mut wtxn, term, &merged)?;
        }
        for (doc_id, frequencies) in &self.doc_terms {
            self.store.doc_terms.put(&mut wtxn, *doc_id, frequencies)?;
        }
        for (parent, child_url) in &self.edges {
            self.store.links.put(&mut wtxn, *parent, child_url)?;
        }
        self.store.main.put_last_page_id(&mut wtxn, self.next_doc_id)?;

        wtxn.commit()?;
        info!(
            pages = self.urls.len(),
            terms = self.postings.len(),
            edges = self.edges.len(),
            "index session committed"
        );
        Ok(())
    }
}
