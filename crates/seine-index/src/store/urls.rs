//! `urls`: canonical URL → `DocId`.

use crate::error::Result;
use crate::store::codec::DocIdCodec;
use heed::types::Str;
use heed::{Database, RoTxn, RwTxn};
use seine_types::DocId;

#[derive(Copy, Clone)]
pub struct Urls {
    pub(crate) database: Database<Str, DocIdCodec>,
}

impl Urls {
    pub fn put(&self, writer: &mut RwTxn, url: &str, doc_id: DocId) -> Result<()> {
        Ok(self.database.put(writer, url, &doc_id)?)
    }

    pub fn get(&self, reader: &RoTxn, url: &str) -> Result<Option<DocId>> {
        Ok(self.database.get(reader, url)?)
    }

    /// Number of indexed documents.
    pub fn len(&self, reader: &RoTxn) -> Result<u64> {
        Ok(self.database.len(reader)? as u64)
    }

    pub fn is_empty(&self, reader: &RoTxn) -> Result<bool> {
        Ok(self.len(reader)? == 0)
    }

    /// All `(url, doc_id)` pairs in URL iteration order.
    pub fn iter<'t>(
        &self,
        reader: &'t RoTxn,
    ) -> Result<impl Iterator<Item = heed::Result<(&'t str, DocId)>>> {
        Ok(self.database.iter(reader)?)
    }
}
