//! Document body storage (spec.md §4.D): deflate-compressed bytes keyed by
//! doc id. Grounded on the teacher's segment-based document storage, here
//! flattened to a single sled tree since bidex has no segment/compaction
//! concept (spec.md Non-goals).

use std::path::Path;

use crate::compress;
use crate::error::{Error, ErrorKind, Result};
use crate::types::DocId;

pub struct DocStore {
    tree: sled::Db,
}

impl DocStore {
    pub fn open(path: &Path) -> Result<Self> {
        let tree = sled::open(path)?;
        Ok(DocStore { tree })
    }

    /// Compress and store `body` under `doc_id`. Overwrites any existing
    /// value (callers never reuse a doc id in practice, since ids are
    /// monotonically assigned, but this is not itself enforced here).
    pub fn put(&self, doc_id: DocId, body: &[u8]) -> Result<()> {
        let compressed = compress::compress(body)?;
        self.tree.insert(doc_id.to_le_bytes(), compressed)?;
        Ok(())
    }

    /// Fetch and decompress the body stored under `doc_id`.
    pub fn get(&self, doc_id: DocId) -> Result<Vec<u8>> {
        match self.tree.get(doc_id.to_le_bytes())? {
            Some(bytes) => compress::decompress(&bytes),
            None => Err(Error::new(
                ErrorKind::DocMissing,
                format!("no document with id {}", doc_id.0),
            )),
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.tree.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_a_body() {
        let dir = tempdir().unwrap();
        let store = DocStore::open(&dir.path().join("doc.sled")).unwrap();
        store.put(DocId(1), b"hello world").unwrap();
        assert_eq!(store.get(DocId(1)).unwrap(), b"hello world");
    }

    #[test]
    fn missing_doc_errors() {
        let dir = tempdir().unwrap();
        let store = DocStore::open(&dir.path().join("doc.sled")).unwrap();
        let err = store.get(DocId(9)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DocMissing));
    }
}
