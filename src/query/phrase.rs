//! Exact phrase matching via positional intersection (spec.md §4.H).
//! Grounded on the teacher's `search` module's merge-walk style posting
//! intersection, re-derived here around the character-gap chaining rule
//! spec.md specifies (overlapping the final two bigrams of an odd-length
//! phrase rather than indexing a trailing single character).

use std::collections::HashSet;

use crate::error::Result;
use crate::ingest;
use crate::posting;
use crate::storage::index_store::IndexStore;
use crate::types::{DocId, Posting};

/// Doc ids whose normalized text contains `phrase` as a contiguous
/// substring. `phrase` is normalized the same way ingest normalizes
/// document text before matching.
pub fn search(index: &IndexStore, phrase: &str) -> Result<Vec<DocId>> {
    let phrase = ingest::normalize(phrase);
    let chars: Vec<char> = phrase.chars().collect();
    let n = chars.len();
    if n < 2 {
        return Ok(Vec::new());
    }

    let mut postings = fetch(index, &bigram_at(&chars, 0))?;
    if postings.is_empty() {
        return Ok(Vec::new());
    }

    let mut pos = 0usize;
    loop {
        let next_start = pos + 2;
        if next_start >= n {
            break;
        }
        // `term_start` is also the gap (spec.md §4.H): positions are
        // tracked relative to the phrase start, and the first bigram
        // begins at offset 0, so the distance from it to a later bigram
        // equals that bigram's own start offset.
        let term_start = if next_start <= n - 2 {
            next_start
        } else {
            next_start - 1
        };

        let term = bigram_at(&chars, term_start);
        pos = term_start;
        let next_list = fetch(index, &term)?;
        postings = intersect(&postings, &next_list, term_start as u32);
        if postings.is_empty() {
            return Ok(Vec::new());
        }
    }

    let mut doc_ids: Vec<DocId> = postings
        .iter()
        .map(|p| p.doc_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    doc_ids.sort();
    Ok(doc_ids)
}

fn bigram_at(chars: &[char], start: usize) -> String {
    chars[start..start + 2].iter().collect()
}

fn fetch(index: &IndexStore, term: &str) -> Result<Vec<Posting>> {
    index
        .get_list(term)?
        .iter()
        .map(|bytes| posting::decode(bytes))
        .collect()
}

/// Merge-walk two posting lists ordered by `(doc_id, attr_id)`. For each
/// matching `(doc_id, attr_id)` pair, keep the positions `p` in `left` such
/// that `p + gap` is a position in `right` — i.e. the two terms begin
/// exactly `gap` characters apart in that document.
fn intersect(left: &[Posting], right: &[Posting], gap: u32) -> Vec<Posting> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        let lk = left[i].sort_key();
        let rk = right[j].sort_key();
        match lk.cmp(&rk) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                let right_positions: HashSet<u32> = right[j].positions.iter().copied().collect();
                let mut positions: Vec<u32> = left[i]
                    .positions
                    .iter()
                    .copied()
                    .filter(|p| right_positions.contains(&(p + gap)))
                    .collect();
                positions.sort_unstable();
                if !positions.is_empty() {
                    out.push(Posting::new(left[i].doc_id, left[i].attr_id, positions));
                }
                i += 1;
                j += 1;
            }
        }
    }
    out
}
