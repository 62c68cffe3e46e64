//! Ingest pipeline (spec.md §4.G): normalize whitespace, bigram-tokenize,
//! group positions by term, and hand the result to the index/document
//! stores. Grounded on the teacher's `analysis` pipeline shape (normalize ->
//! tokenize -> index), flattened since bidex has no pluggable analyzer
//! chain (spec.md Non-goals: no stemming, no stop-words).

use std::collections::HashMap;

use crate::scanner::{bigram_byte_len, char_width};
use crate::types::Position;

/// Collapse runs of whitespace to a single ASCII space and drop leading and
/// trailing whitespace (spec.md §4.G step 1, §8 property 8).
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !out.is_empty() {
                pending_space = true;
            }
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }
    out
}

/// Bigram-tokenize already-normalized `text`, returning each term's
/// ascending, deduplicated-by-construction position list. The final
/// character of the text is deliberately not indexed on its own (spec.md
/// §4.G: "reference behavior indexes full bigrams only").
pub fn index_terms(text: &str) -> Vec<(String, Vec<Position>)> {
    let bytes = text.as_bytes();
    let mut by_term: HashMap<String, Vec<Position>> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    let mut byte_pos = 0usize;
    let mut char_pos: Position = 0;
    while byte_pos < bytes.len() {
        let w0 = char_width(bytes[byte_pos]);
        let has_next = byte_pos + w0 < bytes.len();
        if has_next {
            let blen = bigram_byte_len(bytes, byte_pos);
            let term = text[byte_pos..byte_pos + blen].to_string();
            let positions = by_term.entry(term.clone()).or_insert_with(|| {
                order.push(term.clone());
                Vec::new()
            });
            positions.push(char_pos);
        }
        byte_pos += w0;
        char_pos += 1;
    }

    order
        .into_iter()
        .map(|term| {
            let positions = by_term.remove(&term).unwrap_or_default();
            (term, positions)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_internal_whitespace() {
        assert_eq!(normalize("hello   world"), "hello world");
    }

    #[test]
    fn normalize_trims_leading_and_trailing() {
        assert_eq!(normalize("  hi  "), "hi");
    }

    #[test]
    fn normalize_handles_tabs_and_newlines() {
        assert_eq!(normalize("a\t\nb"), "a b");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("  a   b  c ");
        let twice = normalize(&once);
        assert_eq!(once, twice);
        assert!(!once.starts_with(' ') && !once.ends_with(' '));
        assert!(!once.contains("  "));
    }

    #[test]
    fn index_terms_produces_overlapping_bigrams() {
        let terms = index_terms("abcdef");
        let map: HashMap<_, _> = terms.into_iter().collect();
        assert_eq!(map.get("ab"), Some(&vec![0]));
        assert_eq!(map.get("bc"), Some(&vec![1]));
        assert_eq!(map.get("ef"), None, "last char alone is not indexed");
    }

    #[test]
    fn index_terms_repeats_positions_for_repeated_bigram() {
        let terms = index_terms("abab");
        let map: HashMap<_, _> = terms.into_iter().collect();
        assert_eq!(map.get("ab"), Some(&vec![0, 2]));
    }

    #[test]
    fn index_terms_handles_multibyte_characters() {
        let terms = index_terms("héllo");
        let map: HashMap<_, _> = terms.into_iter().collect();
        assert_eq!(map.get("h\u{e9}"), Some(&vec![0]));
    }
}
