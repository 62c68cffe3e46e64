//! Persistence layer: on-disk layout, advisory locking, and the sled-backed
//! stores layered atop it (SPEC_FULL.md §4).

pub mod attr_store;
pub mod doc_store;
pub mod file_lock;
pub mod index_store;
pub mod kv;
pub mod layout;
