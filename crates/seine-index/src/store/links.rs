//! `links`: the link graph, one entry per directed `(parent DocId, child
//! URL)` edge. Child URLs need not correspond to indexed documents.

use crate::error::{IndexError, Result};
use crate::store::codec::DocIdStrCodec;
use heed::types::{Bytes, Unit};
use heed::{BytesDecode, Database, RoTxn, RwTxn};
use seine_types::DocId;

#[derive(Copy, Clone)]
pub struct Links {
    pub(crate) database: Database<DocIdStrCodec, Unit>,
}

impl Links {
    pub fn put(&self, writer: &mut RwTxn, parent: DocId, child_url: &str) -> Result<()> {
        Ok(self.database.put(writer, &(parent, child_url), &())?)
    }

    /// Child URLs of one document, in key order, capped at `limit`.
    pub fn children(&self, reader: &RoTxn, parent: DocId, limit: usize) -> Result<Vec<String>> {
        let prefix = parent.to_be_bytes();
        let mut children = Vec::new();
        for entry in self
            .database
            .remap_key_type::<Bytes>()
            .prefix_iter(reader, &prefix)?
        {
            if children.len() >= limit {
                break;
            }
            let (key, ()) = entry?;
            let (_, child) = DocIdStrCodec::bytes_decode(key)
                .map_err(|_| IndexError::Corrupt { database: "links" })?;
            children.push(child.to_owned());
        }
        Ok(children)
    }

    /// Every edge in the graph, parent-ordered.
    pub fn iter<'t>(
        &self,
        reader: &'t RoTxn,
    ) -> Result<impl Iterator<Item = heed::Result<((DocId, &'t str), ())>>> {
        Ok(self.database.iter(reader)?)
    }
}
