//! Boolean query evaluation (spec.md §4.J) over the phrase and fuzzy
//! primitive matchers (§4.H, §4.I).

pub mod ast;
pub mod eval;
pub mod fuzzy;
pub mod parser;
pub mod phrase;
