//! Core data model: document identifiers, positional postings, and the
//! records produced by the fetch layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense, non-negative identifier of a crawled page within an index
/// instance. Identifiers are assigned in order of successful fetch and form
/// the contiguous range `[0, N)` after a crawl of `N` pages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Big-endian byte form, used as (part of) store keys so that LMDB
    /// iteration order matches numeric order.
    #[inline]
    pub fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    #[inline]
    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        DocId(u32::from_be_bytes(bytes))
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Per-document record for a term: the ordered list of 0-based token
/// positions at which the term occurs in the document body.
///
/// Positions are strictly increasing and duplicate-free; the term frequency
/// is derived as `positions.len()` rather than stored separately, so the two
/// can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    positions: Vec<u32>,
}

impl Posting {
    /// Append a position. Returns `false` (and leaves the posting untouched)
    /// if `position` does not strictly increase the sequence.
    pub fn record(&mut self, position: u32) -> bool {
        match self.positions.last() {
            Some(&last) if position <= last => false,
            _ => {
                self.positions.push(position);
                true
            }
        }
    }

    /// Number of occurrences of the term in the document.
    #[inline]
    pub fn frequency(&self) -> u32 {
        self.positions.len() as u32
    }

    #[inline]
    pub fn positions(&self) -> &[u32] {
        &self.positions
    }

    /// Whether the term occurs at exactly `position`.
    #[inline]
    pub fn contains_position(&self, position: u32) -> bool {
        self.positions.binary_search(&position).is_ok()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// A successfully fetched page: decoded body plus the response metadata the
/// index and report layers care about.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Decoded response body.
    pub body: String,
    /// Parsed `Last-Modified` header, when the origin sent one.
    pub last_modified: Option<DateTime<Utc>>,
    /// `Content-Length` when present, otherwise the decoded body length.
    pub content_length: u64,
}

/// Lightweight metadata probe result (HEAD request), used when resolving
/// result rows and report entries against the live origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageProbe {
    pub last_modified: Option<DateTime<Utc>>,
    pub content_length: Option<u64>,
}
