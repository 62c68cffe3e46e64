//! On-disk directory layout (spec.md §6). Grounded on the teacher's
//! `storage::layout::StorageLayout`, trimmed to the stores spec.md actually
//! names: a lock file, the next-doc-id counter, the index store, the
//! document store, the attribute registry, and one value store per
//! attribute.

use std::fs;
use std::path::PathBuf;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Layout {
    pub base_dir: PathBuf,
}

impl Layout {
    pub fn new(base_dir: PathBuf) -> Self {
        Layout { base_dir }
    }

    pub fn lock_path(&self) -> PathBuf {
        self.base_dir.join("lock")
    }

    pub fn doc_id_path(&self) -> PathBuf {
        self.base_dir.join("doc_id")
    }

    pub fn index_dir(&self) -> PathBuf {
        self.base_dir.join("index.sled")
    }

    pub fn doc_dir(&self) -> PathBuf {
        self.base_dir.join("doc.sled")
    }

    pub fn attr2id_dir(&self) -> PathBuf {
        self.base_dir.join("attr2id.sled")
    }

    pub fn attrs_dir(&self) -> PathBuf {
        self.base_dir.join("attrs")
    }

    pub fn attr_value_dir(&self, name: &str) -> PathBuf {
        self.attrs_dir().join(format!("{name}.sled"))
    }

    /// Create the directory tree for a brand-new database. Sub-store
    /// directories (`index.sled`, etc.) are created lazily by sled itself on
    /// first open; only `attrs/` needs to exist up front so attribute value
    /// stores have somewhere to live.
    pub fn create(&self) -> Result<()> {
        fs::create_dir(&self.base_dir)?;
        fs::create_dir(self.attrs_dir())?;
        Ok(())
    }
}
