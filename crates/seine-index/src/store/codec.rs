//! Key codecs for the named databases.
//!
//! Document identifiers are stored big-endian so LMDB's lexicographic key
//! order coincides with numeric order, which is what makes the docid-prefixed
//! link keys scannable per document.

use heed::{BoxedError, BytesDecode, BytesEncode};
use seine_types::DocId;
use std::borrow::Cow;
use std::str;

/// Big-endian `DocId` key.
pub struct DocIdCodec;

impl<'a> BytesEncode<'a> for DocIdCodec {
    type EItem = DocId;

    fn bytes_encode(item: &'a Self::EItem) -> Result<Cow<'a, [u8]>, BoxedError> {
        Ok(Cow::Owned(item.to_be_bytes().to_vec()))
    }
}

impl<'a> BytesDecode<'a> for DocIdCodec {
    type DItem = DocId;

    fn bytes_decode(bytes: &'a [u8]) -> Result<Self::DItem, BoxedError> {
        let bytes: [u8; 4] = bytes.try_into()?;
        Ok(DocId::from_be_bytes(bytes))
    }
}

/// Composite `(DocId, str)` key: four big-endian docid bytes followed by the
/// UTF-8 string. Used for link-graph edges, keyed parent-first.
pub struct DocIdStrCodec;

impl<'a> BytesEncode<'a> for DocIdStrCodec {
    type EItem = (DocId, &'a str);

    fn bytes_encode(item: &'a Self::EItem) -> Result<Cow<'a, [u8]>, BoxedError> {
        let (doc_id, string) = item;
        let mut bytes = Vec::with_capacity(4 + string.len());
        bytes.extend_from_slice(&doc_id.to_be_bytes());
        bytes.extend_from_slice(string.as_bytes());
        Ok(Cow::Owned(bytes))
    }
}

impl<'a> BytesDecode<'a> for DocIdStrCodec {
    type DItem = (DocId, &'a str);

    fn bytes_decode(bytes: &'a [u8]) -> Result<Self::DItem, BoxedError> {
        if bytes.len() < 4 {
            return Err("key too short for DocIdStrCodec".into());
        }
        let (head, tail) = bytes.split_at(4);
        let head: [u8; 4] = head.try_into()?;
        let string = str::from_utf8(tail)?;
        Ok((DocId::from_be_bytes(head), string))
    }
}
