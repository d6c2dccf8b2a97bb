//! `postings`: term → (`DocId` → `Posting`), the positional inverted index.

use crate::error::Result;
use crate::store::PostingMap;
use heed::types::{SerdeBincode, Str};
use heed::{Database, RoTxn, RwTxn};

#[derive(Copy, Clone)]
pub struct Postings {
    pub(crate) database: Database<Str, SerdeBincode<PostingMap>>,
}

impl Postings {
    pub fn put(&self, writer: &mut RwTxn, term: &str, postings: &PostingMap) -> Result<()> {
        Ok(self.database.put(writer, term, postings)?)
    }

    pub fn get(&self, reader: &RoTxn, term: &str) -> Result<Option<PostingMap>> {
        Ok(self.database.get(reader, term)?)
    }

    /// Document frequency of a term: the number of documents it occurs in.
    pub fn doc_frequency(&self, reader: &RoTxn, term: &str) -> Result<u64> {
        Ok(self
            .get(reader, term)?
            .map(|postings| postings.len() as u64)
            .unwrap_or(0))
    }

    /// All `(term, posting map)` pairs, term-ordered.
    pub fn iter<'t>(
        &self,
        reader: &'t RoTxn,
    ) -> Result<impl Iterator<Item = heed::Result<(&'t str, PostingMap)>>> {
        Ok(self.database.iter(reader)?)
    }
}
