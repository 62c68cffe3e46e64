//! Attribute registry and per-attribute value stores (spec.md §4.F).
//!
//! The name -> id registry is frozen at `create` time (spec.md §3): ids are
//! assigned 0-based in registration order and never change thereafter.
//! `open` reads the registry back and never mutates it. Each attribute also
//! gets its own raw-value store (doc_id -> bytes) so `get` can fetch a
//! document's attribute value without touching the positional index.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, ErrorKind, Result};
use crate::types::{AttrId, DocId, MAX_ATTRS};

pub struct AttrRegistry {
    tree: sled::Db,
    name_to_id: HashMap<String, AttrId>,
    names: Vec<String>,
}

impl AttrRegistry {
    /// Create a fresh registry from `names`, in order. Fails if more than
    /// `MAX_ATTRS` names are given or if any name repeats.
    pub fn create(path: &Path, names: &[String]) -> Result<Self> {
        if names.len() > MAX_ATTRS {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("at most {MAX_ATTRS} attributes are supported, got {}", names.len()),
            ));
        }
        let tree = sled::open(path)?;
        let mut name_to_id = HashMap::new();
        for (index, name) in names.iter().enumerate() {
            if name_to_id.contains_key(name) {
                return Err(Error::new(
                    ErrorKind::InvalidArgument,
                    format!("duplicate attribute name '{name}'"),
                ));
            }
            tree.insert(name.as_bytes(), &(index as u32).to_le_bytes())?;
            name_to_id.insert(name.clone(), AttrId(index as u32));
        }
        Ok(AttrRegistry {
            tree,
            name_to_id,
            names: names.to_vec(),
        })
    }

    /// Reopen an existing, already-frozen registry.
    pub fn open(path: &Path) -> Result<Self> {
        let tree = sled::open(path)?;
        let mut entries: Vec<(String, AttrId)> = Vec::new();
        for item in tree.iter() {
            let (key, value) = item?;
            let name = String::from_utf8(key.to_vec())
                .map_err(|e| Error::new(ErrorKind::Decode, e.to_string()))?;
            let id_bytes: [u8; 4] = value
                .as_ref()
                .try_into()
                .map_err(|_| Error::new(ErrorKind::Decode, "malformed attribute id"))?;
            entries.push((name, AttrId(u32::from_le_bytes(id_bytes))));
        }
        entries.sort_by_key(|(_, id)| id.0);
        let names = entries.iter().map(|(name, _)| name.clone()).collect();
        let name_to_id = entries.into_iter().collect();
        Ok(AttrRegistry { tree, name_to_id, names })
    }

    pub fn id_of(&self, name: &str) -> Result<AttrId> {
        self.name_to_id
            .get(name)
            .copied()
            .ok_or_else(|| Error::attr_unknown(name))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn flush(&self) -> Result<()> {
        self.tree.flush()?;
        Ok(())
    }
}

/// Per-attribute raw-value store: doc id -> the attribute's uninterpreted
/// bytes, as supplied at `put` time. One of these is opened per registered
/// attribute name.
pub struct AttrValueStore {
    tree: sled::Db,
}

impl AttrValueStore {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(AttrValueStore {
            tree: sled::open(path)?,
        })
    }

    pub fn put(&self, doc_id: DocId, value: &[u8]) -> Result<()> {
        self.tree.insert(doc_id.to_le_bytes(), value)?;
        Ok(())
    }

    pub fn get(&self, doc_id: DocId) -> Result<Option<Vec<u8>>> {
        Ok(self.tree.get(doc_id.to_le_bytes())?.map(|v| v.to_vec()))
    }

    pub fn flush(&self) -> Result<()> {
        self.tree.flush()?;
        Ok(())
    }
}
