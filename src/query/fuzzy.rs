//! Approximate phrase matching via windowed bigram chains (spec.md §4.I).
//!
//! Chain bookkeeping follows SPEC_FULL.md §7 decision 1: an explicit
//! `Vec<Chain>` per document, each chain holding the positions matched so
//! far. A newly observed position either extends the most recent
//! still-open chain, starts a fresh chain, or (if it would make the open
//! chain's span exceed the window) closes the current chain and starts a
//! new one with that position. This resolves the ambiguity spec.md §9
//! flags in the reference implementation's stale-index comparison.

use std::collections::HashMap;

use crate::error::Result;
use crate::ingest;
use crate::posting;
use crate::storage::index_store::IndexStore;
use crate::types::DocId;

struct Chain {
    positions: Vec<u32>,
}

impl Chain {
    fn first(&self) -> u32 {
        self.positions[0]
    }

    fn last(&self) -> u32 {
        *self.positions.last().unwrap()
    }
}

/// Doc ids matching at least half of `phrase`'s bigrams within the
/// positional tolerance window. `phrase` is normalized before matching.
pub fn search(index: &IndexStore, phrase: &str) -> Result<Vec<DocId>> {
    let phrase = ingest::normalize(phrase);
    let chars: Vec<char> = phrase.chars().collect();
    let n = chars.len();
    if n < 2 {
        return Ok(Vec::new());
    }

    let terms_num = (n - 1) as u32;
    let window = (n as u32) / 2;
    let threshold = terms_num / 2;

    let mut chains: HashMap<DocId, Vec<Chain>> = HashMap::new();

    for start in 0..n - 1 {
        let term: String = chars[start..start + 2].iter().collect();
        for bytes in index.get_list(&term)? {
            let posting = posting::decode(&bytes)?;
            if posting.attr_id.is_some() {
                continue; // fuzzy search only considers the document body
            }
            let doc_chains = chains.entry(posting.doc_id).or_default();
            for &q in &posting.positions {
                observe(doc_chains, q, window);
            }
        }
    }

    let mut hits: Vec<DocId> = chains
        .into_iter()
        .filter(|(_, doc_chains)| {
            doc_chains
                .iter()
                .any(|c| c.positions.len() as u32 >= threshold)
        })
        .map(|(doc_id, _)| doc_id)
        .collect();
    hits.sort();
    Ok(hits)
}

/// Fold one observed bigram position `q` into `chains`.
fn observe(chains: &mut Vec<Chain>, q: u32, window: u32) {
    if let Some(open) = chains.last_mut() {
        if q < open.first() {
            chains.push(Chain { positions: vec![q] });
            return;
        }
        // q can land behind open.last() when an earlier phrase bigram
        // matched a later document position than this one; saturating_sub
        // keeps that case from underflowing and just starts a new chain.
        let gap = q.saturating_sub(open.last());
        if gap > window {
            chains.push(Chain { positions: vec![q] });
        } else {
            open.positions.push(q);
        }
    } else {
        chains.push(Chain { positions: vec![q] });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest;
    use crate::posting as posting_codec;
    use crate::types::Posting;
    use tempfile::tempdir;

    fn index_document(index: &IndexStore, doc_id: DocId, text: &str) {
        for (term, positions) in ingest::index_terms(text) {
            let p = Posting::new(doc_id, None, positions);
            index.append(&term, &posting_codec::encode(&p)).unwrap();
        }
    }

    #[test]
    fn tolerates_one_swapped_pair() {
        let dir = tempdir().unwrap();
        let index = IndexStore::open(&dir.path().join("index.sled")).unwrap();
        index_document(&index, DocId(0), "the quick brown fox");
        assert_eq!(search(&index, "quikc brown").unwrap(), vec![DocId(0)]);
    }

    #[test]
    fn rejects_unrelated_text() {
        let dir = tempdir().unwrap();
        let index = IndexStore::open(&dir.path().join("index.sled")).unwrap();
        index_document(&index, DocId(0), "the quick brown fox");
        assert!(search(&index, "zzzzzzzzzzz").unwrap().is_empty());
    }

    #[test]
    fn superset_of_phrase_matches() {
        let dir = tempdir().unwrap();
        let index = IndexStore::open(&dir.path().join("index.sled")).unwrap();
        index_document(&index, DocId(0), "hello world");
        assert_eq!(search(&index, "hello world").unwrap(), vec![DocId(0)]);
    }

    #[test]
    fn fuzzy_matches_short_phrase_against_itself() {
        let dir = tempdir().unwrap();
        let index = IndexStore::open(&dir.path().join("index.sled")).unwrap();
        index_document(&index, DocId(0), "abcde");
        assert_eq!(search(&index, "abcde").unwrap(), vec![DocId(0)]);
    }

    #[test]
    fn sub_bigram_phrase_returns_empty() {
        let dir = tempdir().unwrap();
        let index = IndexStore::open(&dir.path().join("index.sled")).unwrap();
        index_document(&index, DocId(0), "abcdef");
        assert!(search(&index, "a").unwrap().is_empty());
    }
}
