//! Database lifecycle (spec.md §4.K): create, open (shared/exclusive),
//! close, and the operations layered on top (`put`, `get`, `search`,
//! `words`). Grounded on the teacher's `core::database::Database`, stripped
//! of everything downstream of MVCC/WAL/segments — bidex is single-
//! threaded, non-transactional, and append-only (spec.md §5).

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, trace, warn};

use crate::config::Config;
use crate::error::{Error, ErrorKind, Result};
use crate::ingest;
use crate::posting;
use crate::query::ast::Node;
use crate::query::{eval, parser};
use crate::storage::attr_store::{AttrRegistry, AttrValueStore};
use crate::storage::doc_store::DocStore;
use crate::storage::file_lock::FileLock;
use crate::storage::index_store::IndexStore;
use crate::storage::layout::Layout;
use crate::types::{DocId, Posting};

pub struct Database {
    layout: Layout,
    _lock: FileLock,
    next_doc_id: u32,
    index: IndexStore,
    docs: DocStore,
    attrs: AttrRegistry,
    attr_values: Vec<AttrValueStore>,
}

impl Database {
    /// Create a brand-new database at `path` with the given attribute
    /// names, frozen in order (spec.md §4.K `create`).
    pub fn create(config: &Config) -> Result<()> {
        config.validate()?;
        let layout = Layout::new(config.path.clone());
        debug!("creating database at {}", layout.base_dir.display());
        layout.create()?;

        AttrRegistry::create(&layout.attr2id_dir(), &config.attrs)?.flush()?;
        for name in &config.attrs {
            AttrValueStore::open(&layout.attr_value_dir(name))?.flush()?;
        }
        IndexStore::open(&layout.index_dir())?.flush()?;
        DocStore::open(&layout.doc_dir())?.flush()?;
        write_counter(&layout.doc_id_path(), 0)?;

        Ok(())
    }

    pub fn open_read(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(path, false)
    }

    pub fn open_write(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(path, true)
    }

    fn open(path: impl AsRef<Path>, exclusive: bool) -> Result<Self> {
        let layout = Layout::new(path.as_ref().to_path_buf());
        debug!(
            "opening database at {} (exclusive={exclusive})",
            layout.base_dir.display()
        );
        let lock = FileLock::acquire(&layout, exclusive)?;

        let next_doc_id = read_counter(&layout.doc_id_path())?;
        let index = IndexStore::open(&layout.index_dir())?;
        let docs = DocStore::open(&layout.doc_dir())?;
        let attrs = AttrRegistry::open(&layout.attr2id_dir())?;
        let attr_values = attrs
            .names()
            .iter()
            .map(|name| AttrValueStore::open(&layout.attr_value_dir(name)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Database {
            layout,
            _lock: lock,
            next_doc_id,
            index,
            docs,
            attrs,
            attr_values,
        })
    }

    /// Normalize and index `body`, plus any `(name, value)` attribute
    /// pairs, and persist the document (spec.md §4.G). Returns the
    /// assigned doc id.
    pub fn put(&mut self, body: &str, attrs: &[(&str, &str)]) -> Result<DocId> {
        let doc_id = DocId(self.next_doc_id);
        trace!("put doc_id={}", doc_id.0);

        let normalized_body = ingest::normalize(body);
        self.index_text(doc_id, None, &normalized_body)?;
        self.docs.put(doc_id, normalized_body.as_bytes())?;

        for &(name, value) in attrs {
            let attr_id = self.attrs.id_of(name)?;
            let normalized_value = ingest::normalize(value);
            self.index_text(doc_id, Some(attr_id), &normalized_value)?;
            self.attr_values[attr_id.0 as usize].put(doc_id, normalized_value.as_bytes())?;
        }

        self.next_doc_id += 1;
        Ok(doc_id)
    }

    fn index_text(
        &self,
        doc_id: DocId,
        attr_id: Option<crate::types::AttrId>,
        text: &str,
    ) -> Result<()> {
        for (term, positions) in ingest::index_terms(text) {
            let posting = Posting::new(doc_id, attr_id, positions);
            self.index.append(&term, &posting::encode(&posting))?;
        }
        Ok(())
    }

    /// Fetch a document's body, or (if `attr` is given) one of its
    /// attribute values.
    pub fn get(&self, doc_id: DocId, attr: Option<&str>) -> Result<String> {
        let bytes = match attr {
            None => self.docs.get(doc_id)?,
            Some(name) => {
                let attr_id = self.attrs.id_of(name)?;
                self.attr_values[attr_id.0 as usize]
                    .get(doc_id)?
                    .ok_or_else(|| Error::doc_missing(doc_id.0))?
            }
        };
        String::from_utf8(bytes).map_err(|e| Error::new(ErrorKind::Decode, e.to_string()))
    }

    /// Evaluate a query string against the index (spec.md §4.J).
    pub fn search(&self, query: &str) -> Result<Vec<DocId>> {
        let node = parser::parse(query)?;
        self.search_node(&node)
    }

    pub fn search_node(&self, node: &Node) -> Result<Vec<DocId>> {
        eval::evaluate(&self.index, node)
    }

    /// Every indexed term, in byte order (backs the `words` CLI subcommand).
    pub fn words(&self) -> Result<Vec<String>> {
        self.index.terms()
    }

    /// Flush every sub-store and release the lock. Collects errors from
    /// each sub-store rather than stopping at the first (spec.md §4.K
    /// "close"); returns the first one encountered, if any.
    pub fn close(self) -> Result<()> {
        debug!("closing database at {}", self.layout.base_dir.display());
        let mut first_err = None;
        let mut note = |result: Result<()>| {
            if let Err(e) = result {
                warn!("error while closing a sub-store: {e}");
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        };

        note(self.index.flush());
        note(self.docs.flush());
        note(self.attrs.flush());
        for store in &self.attr_values {
            note(store.flush());
        }
        note(write_counter(&self.layout.doc_id_path(), self.next_doc_id));

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn read_counter(path: &PathBuf) -> Result<u32> {
    let bytes = fs::read(path).map_err(|e| crate::error::io_error("reading doc id counter", path, e))?;
    let array: [u8; 4] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| Error::new(ErrorKind::Decode, "doc_id counter is not 4 bytes"))?;
    Ok(u32::from_le_bytes(array))
}

fn write_counter(path: &Path, value: u32) -> Result<()> {
    fs::write(path, value.to_le_bytes())?;
    Ok(())
}
