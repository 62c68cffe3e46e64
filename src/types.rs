//! Core data types shared across the codec, storage, and query layers.

/// Dense, monotonically assigned document identifier. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocId(pub u32);

impl DocId {
    pub fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    pub fn from_le_bytes(bytes: [u8; 4]) -> Self {
        DocId(u32::from_le_bytes(bytes))
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

/// Small integer identifying a named attribute. The core supports at most 32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttrId(pub u32);

/// Maximum number of attributes a database may register (spec.md §3).
pub const MAX_ATTRS: usize = 32;

/// Character offset (not byte offset) within a normalized text unit.
pub type Position = u32;

/// One document's occurrence record for one term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub attr_id: Option<AttrId>,
    pub positions: Vec<Position>,
}

impl Posting {
    pub fn new(doc_id: DocId, attr_id: Option<AttrId>, positions: Vec<Position>) -> Self {
        Posting {
            doc_id,
            attr_id,
            positions,
        }
    }

    /// Sort key used by the index store and the matchers: ascending
    /// (doc_id, attr_id), with the body (None) attribute ordered first.
    pub fn sort_key(&self) -> (DocId, u32) {
        (self.doc_id, self.attr_id.map(|a| a.0).unwrap_or(0))
    }
}
