//! Ordered multi-valued key-value layering atop sled (SPEC_FULL.md §4).
//!
//! spec.md's persistence substrate is "byte key -> sorted list of byte
//! values, duplicates preserved in insertion order". sled trees are
//! single-valued, so each logical value is stored under a composite key
//! `key || be_u64(sequence)`, with `sequence` a monotonically increasing
//! counter scoped to this tree. Because sled iterates keys in lexicographic
//! byte order, `scan_prefix(key)` yields values in exactly insertion order.

use crate::error::Result;

pub struct MultiMap {
    tree: sled::Tree,
}

impl MultiMap {
    pub fn new(tree: sled::Tree) -> Self {
        MultiMap { tree }
    }

    /// Append `value` to the list stored under `key`.
    pub fn append(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let sequence = self.tree.generate_id()?;
        let mut composite = Vec::with_capacity(key.len() + 8);
        composite.extend_from_slice(key);
        composite.extend_from_slice(&sequence.to_be_bytes());
        self.tree.insert(composite, value)?;
        Ok(())
    }

    /// Return every value stored under `key`, in insertion order.
    pub fn get_list(&self, key: &[u8]) -> Result<Vec<Vec<u8>>> {
        let mut out = Vec::new();
        for entry in self.tree.scan_prefix(key) {
            let (_, value) = entry?;
            out.push(value.to_vec());
        }
        Ok(out)
    }

    /// Iterate over the distinct logical keys present in this map, in byte
    /// order. Used by the `words` CLI subcommand.
    pub fn keys(&self) -> Result<Vec<Vec<u8>>> {
        let mut out: Vec<Vec<u8>> = Vec::new();
        for entry in self.tree.iter() {
            let (composite, _) = entry?;
            let key_len = composite.len().saturating_sub(8);
            let key = composite[..key_len].to_vec();
            if out.last().map(|k| k != &key).unwrap_or(true) {
                out.push(key);
            }
        }
        Ok(out)
    }

    pub fn flush(&self) -> Result<()> {
        self.tree.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open() -> MultiMap {
        let db = sled::Config::new().temporary(true).open().unwrap();
        MultiMap::new(db.open_tree("t").unwrap())
    }

    #[test]
    fn appends_preserve_insertion_order() {
        let map = open();
        map.append(b"term", b"one").unwrap();
        map.append(b"term", b"two").unwrap();
        map.append(b"term", b"three").unwrap();
        assert_eq!(
            map.get_list(b"term").unwrap(),
            vec![b"one".to_vec(), b"two".to_vec(), b"three".to_vec()]
        );
    }

    #[test]
    fn distinct_keys_do_not_collide() {
        let map = open();
        map.append(b"aa", b"x").unwrap();
        map.append(b"ab", b"y").unwrap();
        assert_eq!(map.get_list(b"aa").unwrap(), vec![b"x".to_vec()]);
        assert_eq!(map.get_list(b"ab").unwrap(), vec![b"y".to_vec()]);
    }

    #[test]
    fn missing_key_returns_empty() {
        let map = open();
        assert!(map.get_list(b"nope").unwrap().is_empty());
    }

    #[test]
    fn keys_lists_distinct_prefixes_once() {
        let map = open();
        map.append(b"aa", b"1").unwrap();
        map.append(b"aa", b"2").unwrap();
        map.append(b"zz", b"3").unwrap();
        assert_eq!(map.keys().unwrap(), vec![b"aa".to_vec(), b"zz".to_vec()]);
    }
}
