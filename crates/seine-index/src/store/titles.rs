//! `titles`: `DocId` → title. A document is present iff its title is
//! non-empty; absence means the presentation layer shows `Untitled`.

use crate::error::Result;
use crate::store::codec::DocIdCodec;
use heed::types::Str;
use heed::{Database, RoTxn, RwTxn};
use seine_types::DocId;

#[derive(Copy, Clone)]
pub struct Titles {
    pub(crate) database: Database<DocIdCodec, Str>,
}

impl Titles {
    pub fn put(&self, writer: &mut RwTxn, doc_id: DocId, title: &str) -> Result<()> {
        Ok(self.database.put(writer, &doc_id, title)?)
    }

    pub fn get(&self, reader: &RoTxn, doc_id: DocId) -> Result<Option<String>> {
        Ok(self.database.get(reader, &doc_id)?.map(str::to_owned))
    }
}
