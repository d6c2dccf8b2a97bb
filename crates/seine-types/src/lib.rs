//! # Seine Types
//!
//! Shared types for the seine search engine workspace. This crate holds the
//! data model every other crate agrees on (document identifiers, positional
//! postings, fetched-page records) and the port traits that decouple the
//! crawler from its collaborators:
//!
//! - **[`Fetcher`]**: HTTP retrieval (implemented by `seine-fetch`)
//! - **[`HtmlExtractor`]**: title/text/link extraction (implemented by `seine-html`)
//!
//! Keeping the ports here avoids circular dependencies between the spider
//! and the crates that implement its collaborators.

pub mod errors;
pub mod ports;
pub mod types;

pub use errors::FetchError;
pub use ports::{Fetcher, HtmlExtractor};
pub use types::{DocId, FetchedPage, PageProbe, Posting};
