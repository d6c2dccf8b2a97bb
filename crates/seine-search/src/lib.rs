//! # Seine Search
//!
//! Ranked, phrase-aware retrieval over the persistent index:
//!
//! 1. [`query`] splits a raw query into phrases of stems (bare words are
//!    one-stem phrases, quoted spans keep their order).
//! 2. [`phrase`] gates documents: a result must contain every phrase, with
//!    quoted phrases requiring consecutive positions.
//! 3. [`score`] ranks the gated documents by summed per-phrase TF-IDF
//!    cosine similarity, boosting terms that appear in the title.
//! 4. [`results`] turns the ranked DocIds into presentable records with
//!    metadata, keywords, and link neighborhoods.
//!
//! [`SearchEngine`] wires the four together over one store snapshot per
//! query.

pub mod engine;
pub mod phrase;
pub mod query;
pub mod results;
pub mod score;

pub use engine::SearchEngine;
pub use results::{Keyword, SearchHit};
