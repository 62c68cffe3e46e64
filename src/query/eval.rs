//! Boolean evaluator (spec.md §4.J): walks a `Node` tree, combining
//! `Phrase`/`Fuzzy` primitive hit sets via set union/intersection/
//! difference. Grounded on the teacher's `query::matcher` combinator
//! style, flattened to the doc-id-set semantics spec.md requires (no
//! scoring — combination here discards any positional information).

use std::collections::BTreeSet;

use crate::error::Result;
use crate::query::ast::Node;
use crate::query::{fuzzy, phrase};
use crate::storage::index_store::IndexStore;
use crate::types::DocId;

pub fn evaluate(index: &IndexStore, node: &Node) -> Result<Vec<DocId>> {
    let set = eval_set(index, node)?;
    Ok(set.into_iter().collect())
}

fn eval_set(index: &IndexStore, node: &Node) -> Result<BTreeSet<DocId>> {
    match node {
        Node::Phrase(text) => Ok(phrase::search(index, text)?.into_iter().collect()),
        Node::Fuzzy(text) => Ok(fuzzy::search(index, text)?.into_iter().collect()),
        Node::And(l, r) => {
            let left = eval_set(index, l)?;
            let right = eval_set(index, r)?;
            Ok(left.intersection(&right).copied().collect())
        }
        Node::Or(l, r) => {
            let left = eval_set(index, l)?;
            let right = eval_set(index, r)?;
            Ok(left.union(&right).copied().collect())
        }
        Node::Not(l, r) => {
            let left = eval_set(index, l)?;
            let right = eval_set(index, r)?;
            Ok(left.difference(&right).copied().collect())
        }
    }
}
