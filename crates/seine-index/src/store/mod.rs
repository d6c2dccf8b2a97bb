//! The persistent index store: one LMDB environment, six named databases.
//!
//! Databases are created on first open and loaded thereafter, so a store
//! directory is self-describing across restarts. All mutation goes through
//! an explicit write transaction; `commit` is the only durability boundary,
//! and concurrent readers always observe the last committed snapshot.

mod codec;
mod doc_terms;
mod links;
mod main;
mod postings;
mod titles;
mod urls;

pub use self::codec::{DocIdCodec, DocIdStrCodec};
pub use self::doc_terms::DocTerms;
pub use self::links::Links;
pub use self::main::Main;
pub use self::postings::Postings;
pub use self::titles::Titles;
pub use self::urls::Urls;

use crate::error::Result;
use heed::{Env, EnvOpenOptions, RoTxn, RwTxn};
use seine_types::{DocId, Posting};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The posting lists of one term, ordered by document.
pub type PostingMap = BTreeMap<DocId, Posting>;

/// Term frequencies of one document, term-ordered.
pub type TermFrequencies = BTreeMap<String, u32>;

/// Default LMDB map size: 1 GiB of address space, grown on disk only as
/// pages are actually written.
const DEFAULT_MAP_SIZE: usize = 1024 * 1024 * 1024;

/// Handle on the index environment and its named databases.
#[derive(Clone)]
pub struct IndexStore {
    env: Env,
    pub urls: Urls,
    pub titles: Titles,
    pub postings: Postings,
    pub links: Links,
    pub doc_terms: DocTerms,
    pub main: Main,
}

impl IndexStore {
    /// Open (or create) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        fs::create_dir_all(path)?;
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(DEFAULT_MAP_SIZE)
                .max_dbs(8)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let urls = Urls {
            database: env.create_database(&mut wtxn, Some("urls"))?,
        };
        let titles = Titles {
            database: env.create_database(&mut wtxn, Some("titles"))?,
        };
        let postings = Postings {
            database: env.create_database(&mut wtxn, Some("postings"))?,
        };
        let links = Links {
            database: env.create_database(&mut wtxn, Some("links"))?,
        };
        let doc_terms = DocTerms {
            database: env.create_database(&mut wtxn, Some("docs"))?,
        };
        let main = Main {
            database: env.create_database(&mut wtxn, Some("main"))?,
        };
        wtxn.commit()?;

        Ok(Self {
            env,
            urls,
            titles,
            postings,
            links,
            doc_terms,
            main,
        })
    }

    pub fn read_txn(&self) -> Result<RoTxn> {
        Ok(self.env.read_txn()?)
    }

    pub fn write_txn(&self) -> Result<RwTxn> {
        Ok(self.env.write_txn()?)
    }

    /// Total number of indexed documents.
    pub fn doc_count(&self, reader: &RoTxn) -> Result<u64> {
        self.urls.len(reader)
    }
}
