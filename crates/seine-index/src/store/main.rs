//! `main`: index-wide metadata under string keys.

use crate::error::Result;
use heed::types::{SerdeBincode, Str};
use heed::{Database, RoTxn, RwTxn};

const LAST_PAGE_ID_KEY: &str = "last-page-id";

#[derive(Copy, Clone)]
pub struct Main {
    pub(crate) database: Database<Str, SerdeBincode<u32>>,
}

impl Main {
    /// The next document identifier to assign. Zero on a fresh store; only
    /// ever advanced inside a crawl commit, so a crash before commit leaves
    /// it at its pre-crawl value.
    pub fn last_page_id(&self, reader: &RoTxn) -> Result<u32> {
        Ok(self.database.get(reader, LAST_PAGE_ID_KEY)?.unwrap_or(0))
    }

    pub fn put_last_page_id(&self, writer: &mut RwTxn, value: u32) -> Result<()> {
        Ok(self.database.put(writer, LAST_PAGE_ID_KEY, &value)?)
    }
}
