//! Query-string grammar (SPEC_FULL.md §5): whitespace separates atoms with
//! implicit `OR`; an explicit `AND`/`OR`/`NOT` keyword sets the combinator
//! for the following atom; a leading `~` marks an atom fuzzy instead of
//! exact; a double-quoted span is a single phrase atom. Small by design —
//! spec.md leaves the grammar unspecified, only the `Node` tree it must
//! produce. Grounded on the teacher's `query::parser`, which also reaches
//! for `nom` to tokenize its (much larger) query language.

use nom::bytes::complete::take_till1;
use nom::character::complete::{char, multispace0, none_of};
use nom::combinator::{opt, recognize};
use nom::multi::many0;
use nom::sequence::delimited;
use nom::IResult;

use crate::error::{Error, ErrorKind, Result};
use crate::query::ast::Node;

#[derive(Clone, Copy)]
enum Op {
    And,
    Or,
    Not,
}

pub fn parse(input: &str) -> Result<Node> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::new(ErrorKind::InvalidArgument, "empty query"));
    }

    let (mut rest, mut node) = atom(trimmed).map_err(|e| nom_err(trimmed, e))?;
    loop {
        let (after_ws, _) = multispace0::<_, nom::error::Error<&str>>(rest).unwrap();
        if after_ws.is_empty() {
            break;
        }
        let (after_op, op) = opt(operator)(after_ws).map_err(|e| nom_err(after_ws, e))?;
        let op = op.unwrap_or(Op::Or);
        let (after_ws2, _) = multispace0::<_, nom::error::Error<&str>>(after_op).unwrap();
        let (after_atom, next) = atom(after_ws2).map_err(|e| nom_err(after_ws2, e))?;
        node = match op {
            Op::And => node.and(next),
            Op::Or => node.or(next),
            Op::Not => node.not(next),
        };
        rest = after_atom;
    }
    Ok(node)
}

fn operator(input: &str) -> IResult<&str, Op> {
    let (rest, word) = take_till1(|c: char| c.is_whitespace())(input)?;
    match word {
        "AND" => Ok((rest, Op::And)),
        "OR" => Ok((rest, Op::Or)),
        "NOT" => Ok((rest, Op::Not)),
        _ => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        ))),
    }
}

fn atom(input: &str) -> IResult<&str, Node> {
    if let Some(rest) = input.strip_prefix('~') {
        let (rest, text) = atom_text(rest)?;
        return Ok((rest, Node::Fuzzy(text)));
    }
    let (rest, text) = atom_text(input)?;
    Ok((rest, Node::Phrase(text)))
}

fn atom_text(input: &str) -> IResult<&str, String> {
    if input.starts_with('"') {
        let (rest, inner) =
            delimited(char('"'), recognize(many0(none_of("\""))), char('"'))(input)?;
        Ok((rest, inner.to_string()))
    } else {
        let (rest, word) = take_till1(|c: char| c.is_whitespace())(input)?;
        Ok((rest, word.to_string()))
    }
}

fn nom_err(input: &str, err: nom::Err<nom::error::Error<&str>>) -> Error {
    Error::new(
        ErrorKind::InvalidArgument,
        format!("malformed query near '{}': {}", input, err),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_or_between_bare_atoms() {
        let node = parse("alpha beta").unwrap();
        assert_eq!(
            node,
            Node::Phrase("alpha".into()).or(Node::Phrase("beta".into()))
        );
    }

    #[test]
    fn explicit_and_or_not() {
        assert_eq!(
            parse("alpha AND beta").unwrap(),
            Node::Phrase("alpha".into()).and(Node::Phrase("beta".into()))
        );
        assert_eq!(
            parse("alpha OR beta").unwrap(),
            Node::Phrase("alpha".into()).or(Node::Phrase("beta".into()))
        );
        assert_eq!(
            parse("alpha NOT beta").unwrap(),
            Node::Phrase("alpha".into()).not(Node::Phrase("beta".into()))
        );
    }

    #[test]
    fn fuzzy_marker_and_quoted_phrase() {
        assert_eq!(parse("~quikc").unwrap(), Node::Fuzzy("quikc".into()));
        assert_eq!(
            parse("\"exact phrase\"").unwrap(),
            Node::Phrase("exact phrase".into())
        );
    }

    #[test]
    fn fuzzy_quoted_phrase() {
        assert_eq!(
            parse("~\"quikc brown\"").unwrap(),
            Node::Fuzzy("quikc brown".into())
        );
    }

    #[test]
    fn empty_query_errors() {
        assert!(parse("   ").is_err());
    }
}
