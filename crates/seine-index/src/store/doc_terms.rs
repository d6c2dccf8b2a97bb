//! `docs`: `DocId` → per-document term frequencies.
//!
//! Derived from the postings but persisted on its own so that top-keyword
//! extraction and document-vector norms read one entry instead of scanning
//! every term in the index.

use crate::error::Result;
use crate::store::codec::DocIdCodec;
use crate::store::TermFrequencies;
use heed::types::SerdeBincode;
use heed::{Database, RoTxn, RwTxn};
use seine_types::DocId;

#[derive(Copy, Clone)]
pub struct DocTerms {
    pub(crate) database: Database<DocIdCodec, SerdeBincode<TermFrequencies>>,
}

impl DocTerms {
    pub fn put(
        &self,
        writer: &mut RwTxn,
        doc_id: DocId,
        frequencies: &TermFrequencies,
    ) -> Result<()> {
        Ok(self.database.put(writer, &doc_id, frequencies)?)
    }

    pub fn get(&self, reader: &RoTxn, doc_id: DocId) -> Result<Option<TermFrequencies>> {
        Ok(self.database.get(reader, &doc_id)?)
    }
}
