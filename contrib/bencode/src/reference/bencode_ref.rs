use std::collections::BTreeMap;
use std::str;

use crate::error::{BencodeConvertError, BencodeConvertResult, BencodeParseError, BencodeParseResult};
use crate::reference::decode;
use crate::reference::decode_opt::BDecodeOpt;

/// Bencode object that holds references to the underlying data.
///
/// Every variant also keeps the slice of the input it was decoded from.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum Inner<'a> {
    /// Bencode Integer.
    Int(i64, &'a [u8]),
    /// Bencode Bytes.
    Bytes(&'a [u8], &'a [u8]),
    /// Bencode List.
    List(Vec<BencodeRef<'a>>, &'a [u8]),
    /// Bencode Dictionary.
    Dict(BTreeMap<&'a [u8], BencodeRef<'a>>, &'a [u8]),
}

impl<'a> From<Inner<'a>> for BencodeRef<'a> {
    fn from(val: Inner<'a>) -> Self {
        BencodeRef { inner: val }
    }
}

/// `BencodeRef` object that stores references to some buffer.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct BencodeRef<'a> {
    inner: Inner<'a>,
}

impl<'a> BencodeRef<'a> {
    /// Decode the given bytes into a `BencodeRef` using the given decode options.
    ///
    /// # Errors
    ///
    /// Will return a `BencodeParseError` if the bytes are not a well formed
    /// encoding, or if `opts` enforces a full decode and bytes are left over.
    pub fn decode(bytes: &'a [u8], opts: BDecodeOpt) -> BencodeParseResult<BencodeRef<'a>> {
        let (bencode, end_pos) = decode::decode(bytes, 0, opts, 0)?;

        if end_pos != bytes.len() && opts.enforce_full_decode() {
            return Err(BencodeParseError::BytesEmpty { pos: end_pos });
        }

        Ok(bencode)
    }

    /// Get a byte slice of the current bencode byte representation.
    #[must_use]
    pub fn buffer(&self) -> &'a [u8] {
        #[allow(clippy::match_same_arms)]
        match self.inner {
            Inner::Int(_, buffer) => buffer,
            Inner::Bytes(_, buffer) => buffer,
            Inner::List(_, buffer) => buffer,
            Inner::Dict(_, buffer) => buffer,
        }
    }

    #[must_use]
    pub fn int(&self) -> Option<i64> {
        match self.inner {
            Inner::Int(n, _) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn bytes(&self) -> Option<&'a [u8]> {
        match self.inner {
            Inner::Bytes(n, _) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn str(&self) -> Option<&'a str> {
        str::from_utf8(self.bytes()?).ok()
    }

    #[must_use]
    pub fn list(&self) -> Option<&[BencodeRef<'a>]> {
        match self.inner {
            Inner::List(ref n, _) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn dict(&self) -> Option<&BTreeMap<&'a [u8], BencodeRef<'a>>> {
        match self.inner {
            Inner::Dict(ref n, _) => Some(n),
            _ => None,
        }
    }

    /// Looks up `key` in this value, which must be a dictionary.
    ///
    /// # Errors
    ///
    /// Will return `WrongType` if this value is not a dictionary and
    /// `MissingKey` if the dictionary does not hold `key`.
    pub fn lookup(&self, key: &[u8]) -> BencodeConvertResult<&BencodeRef<'a>> {
        let dict = self.dict().ok_or_else(|| BencodeConvertError::WrongType {
            key: key.to_vec(),
            expected_type: "Dictionary",
        })?;

        dict.get(key).ok_or_else(|| BencodeConvertError::MissingKey { key: key.to_vec() })
    }

    /// # Errors
    ///
    /// See [`BencodeRef::lookup`]. Also `WrongType` if the value is not an integer.
    pub fn lookup_int(&self, key: &[u8]) -> BencodeConvertResult<i64> {
        self.lookup(key)?.int().ok_or_else(|| wrong_type(key, "Integer"))
    }

    /// # Errors
    ///
    /// See [`BencodeRef::lookup`]. Also `WrongType` if the value is not a byte string.
    pub fn lookup_bytes(&self, key: &[u8]) -> BencodeConvertResult<&'a [u8]> {
        self.lookup(key)?.bytes().ok_or_else(|| wrong_type(key, "Bytes"))
    }

    /// # Errors
    ///
    /// See [`BencodeRef::lookup`]. Also `WrongType` if the value is not UTF-8 bytes.
    pub fn lookup_str(&self, key: &[u8]) -> BencodeConvertResult<&'a str> {
        self.lookup(key)?.str().ok_or_else(|| wrong_type(key, "UTF-8 Bytes"))
    }

    /// # Errors
    ///
    /// See [`BencodeRef::lookup`]. Also `WrongType` if the value is not a list.
    pub fn lookup_list(&self, key: &[u8]) -> BencodeConvertResult<&[BencodeRef<'a>]> {
        self.lookup(key)?.list().ok_or_else(|| wrong_type(key, "List"))
    }
}

fn wrong_type(key: &[u8], expected_type: &'static str) -> BencodeConvertError {
    BencodeConvertError::WrongType {
        key: key.to_vec(),
        expected_type,
    }
}
