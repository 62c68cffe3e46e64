//! Term -> ordered posting-list store (spec.md §4.E). One composite-keyed
//! `MultiMap` (see `storage::kv`) over the raw UTF-8 bytes of each bigram
//! term.

use std::path::Path;

use crate::error::Result;
use crate::storage::kv::MultiMap;

pub struct IndexStore {
    map: MultiMap,
}

impl IndexStore {
    pub fn open(path: &Path) -> Result<Self> {
        let db = sled::open(path)?;
        let tree = db.open_tree("postings")?;
        Ok(IndexStore {
            map: MultiMap::new(tree),
        })
    }

    /// Append one encoded posting to `term`'s list.
    pub fn append(&self, term: &str, posting_bytes: &[u8]) -> Result<()> {
        self.map.append(term.as_bytes(), posting_bytes)
    }

    /// Every encoded posting stored under `term`, in insertion order.
    pub fn get_list(&self, term: &str) -> Result<Vec<Vec<u8>>> {
        self.map.get_list(term.as_bytes())
    }

    /// Every distinct term that has at least one posting, in byte order.
    /// Backs the `words` CLI subcommand.
    pub fn terms(&self) -> Result<Vec<String>> {
        self.map
            .keys()?
            .into_iter()
            .map(|bytes| {
                String::from_utf8(bytes)
                    .map_err(|e| crate::error::Error::new(crate::error::ErrorKind::Decode, e.to_string()))
            })
            .collect()
    }

    pub fn flush(&self) -> Result<()> {
        self.map.flush()
    }
}
