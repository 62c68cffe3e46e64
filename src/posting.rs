//! Posting wire format (spec.md §4.C): a concatenation of varints encoding
//! one `(doc_id, attr_id?, positions)` tuple. Grounded on the teacher's
//! `index::posting` module, but bit-exact to the tuple layout spec.md
//! requires rather than the teacher's delta/roaring scheme — positions here
//! are small and few enough per posting that plain varints are what the
//! original format specifies, and the wire format is part of the on-disk
//! contract so it can't be swapped for a different encoding.

use crate::error::{Error, ErrorKind, Result};
use crate::types::{AttrId, DocId, Posting};
use crate::varint;

/// Encode one posting as `tagged_doc_id [attr_id] position_count positions...`.
pub fn encode(posting: &Posting) -> Vec<u8> {
    let mut out = Vec::new();

    let tagged = ((posting.doc_id.0 as u64) << 1) | (posting.attr_id.is_some() as u64);
    varint::encode(&mut out, tagged);

    if let Some(attr_id) = posting.attr_id {
        varint::encode(&mut out, attr_id.0 as u64);
    }

    varint::encode(&mut out, posting.positions.len() as u64);
    for &pos in &posting.positions {
        varint::encode(&mut out, pos as u64);
    }

    out
}

/// Decode one posting from the front of `bytes`. Unlike the stream-of-many
/// form in §4.E (one posting blob per key), callers here always have the
/// entire posting's bytes, so no consumed-length is returned.
pub fn decode(bytes: &[u8]) -> Result<Posting> {
    let mut offset = 0;

    let (tagged, consumed) = varint::decode(&bytes[offset..])?;
    offset += consumed;

    let has_attr = tagged & 1 == 1;
    let doc_id = DocId((tagged >> 1) as u32);

    let attr_id = if has_attr {
        let (attr, consumed) = varint::decode(&bytes[offset..])?;
        offset += consumed;
        Some(AttrId(attr as u32))
    } else {
        None
    };

    let (count, consumed) = varint::decode(&bytes[offset..])?;
    offset += consumed;

    let mut positions = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let (pos, consumed) = varint::decode(&bytes[offset..])?;
        offset += consumed;
        positions.push(pos as u32);
    }

    if offset != bytes.len() {
        return Err(Error::new(
            ErrorKind::Decode,
            "trailing bytes after posting",
        ));
    }

    Ok(Posting {
        doc_id,
        attr_id,
        positions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_body_posting() {
        let posting = Posting::new(DocId(7), None, vec![0, 3, 5]);
        let bytes = encode(&posting);
        assert_eq!(decode(&bytes).unwrap(), posting);
    }

    #[test]
    fn round_trip_attr_posting() {
        let posting = Posting::new(DocId(42), Some(AttrId(2)), vec![0, 1]);
        let bytes = encode(&posting);
        assert_eq!(decode(&bytes).unwrap(), posting);
    }

    #[test]
    fn round_trip_no_positions() {
        let posting = Posting::new(DocId(0), None, vec![]);
        let bytes = encode(&posting);
        assert_eq!(decode(&bytes).unwrap(), posting);
    }

    #[test]
    fn attr_tag_bit_distinguishes_body_from_attribute() {
        let body = encode(&Posting::new(DocId(1), None, vec![]));
        let attr = encode(&Posting::new(DocId(1), Some(AttrId(0)), vec![]));
        assert_ne!(body, attr);
    }

    #[test]
    fn malformed_stream_errors() {
        assert!(decode(&[0x80]).is_err());
    }
}
