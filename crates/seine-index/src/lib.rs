//! # Seine Index
//!
//! The persistent heart of the search engine: text analysis, the positional
//! inverted index and its sibling maps in an embedded LMDB environment, the
//! write session used by the crawler, and the crawl report writer.
//!
//! ## Store layout
//!
//! One LMDB environment holds six named databases:
//!
//! | Name       | Key            | Value                         |
//! |------------|----------------|-------------------------------|
//! | `urls`     | URL            | `DocId`                       |
//! | `titles`   | `DocId`        | title (only when non-empty)   |
//! | `postings` | term           | `DocId → Posting` (positions) |
//! | `links`    | `(DocId, URL)` | unit (the link graph)         |
//! | `docs`     | `DocId`        | term → frequency              |
//! | `main`     | metadata key   | e.g. the `last-page-id` counter |
//!
//! All writes for one crawl go through an [`IndexSession`] and become
//! durable in a single commit; readers always see the last committed
//! snapshot.

pub use heed;

pub mod analyzer;
pub mod error;
pub mod report;
pub mod store;
pub mod writer;

pub use analyzer::Analyzer;
pub use error::{IndexError, Result};
pub use store::{IndexStore, PostingMap, TermFrequencies};
pub use writer::IndexSession;
