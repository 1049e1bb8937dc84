use std::borrow::Cow;
use std::collections::BTreeMap;
use std::str;

use crate::mutable::encode;
use crate::reference::bencode_ref::BencodeRef;

/// Owned or borrowed bencode value used to build documents.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum Inner<'a> {
    /// Bencode Integer.
    Int(i64),
    /// Bencode Bytes.
    Bytes(Cow<'a, [u8]>),
    /// Bencode List.
    List(Vec<BencodeMut<'a>>),
    /// Bencode Dictionary.
    Dict(BTreeMap<Cow<'a, [u8]>, BencodeMut<'a>>),
}

/// `BencodeMut` object used to build and encode bencode.
///
/// Dictionaries are kept in a `BTreeMap`, so keys are always encoded in
/// ascending byte order and the same logical value always encodes to the
/// same bytes.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct BencodeMut<'a> {
    inner: Inner<'a>,
}

impl<'a> BencodeMut<'a> {
    fn new(inner: Inner<'a>) -> BencodeMut<'a> {
        BencodeMut { inner }
    }

    /// Create a new `BencodeMut` representing an `i64`.
    #[must_use]
    pub fn new_int(value: i64) -> BencodeMut<'a> {
        BencodeMut::new(Inner::Int(value))
    }

    /// Create a new `BencodeMut` representing a `[u8]`.
    #[must_use]
    pub fn new_bytes(value: Cow<'a, [u8]>) -> BencodeMut<'a> {
        BencodeMut::new(Inner::Bytes(value))
    }

    /// Create a new, empty, `BencodeMut` list.
    #[must_use]
    pub fn new_list() -> BencodeMut<'a> {
        BencodeMut::new(Inner::List(Vec::new()))
    }

    /// Create a new, empty, `BencodeMut` dictionary.
    #[must_use]
    pub fn new_dict() -> BencodeMut<'a> {
        BencodeMut::new(Inner::Dict(BTreeMap::new()))
    }

    #[must_use]
    pub fn from_list(list: Vec<BencodeMut<'a>>) -> BencodeMut<'a> {
        BencodeMut::new(Inner::List(list))
    }

    #[must_use]
    pub fn from_dict(dict: BTreeMap<Cow<'a, [u8]>, BencodeMut<'a>>) -> BencodeMut<'a> {
        BencodeMut::new(Inner::Dict(dict))
    }

    #[must_use]
    pub fn inner(&self) -> &Inner<'a> {
        &self.inner
    }

    #[must_use]
    pub fn int(&self) -> Option<i64> {
        match self.inner {
            Inner::Int(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        match self.inner {
            Inner::Bytes(ref n) => Some(n.as_ref()),
            _ => None,
        }
    }

    #[must_use]
    pub fn str(&self) -> Option<&str> {
        str::from_utf8(self.bytes()?).ok()
    }

    #[must_use]
    pub fn list(&self) -> Option<&[BencodeMut<'a>]> {
        match self.inner {
            Inner::List(ref n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn dict(&self) -> Option<&BTreeMap<Cow<'a, [u8]>, BencodeMut<'a>>> {
        match self.inner {
            Inner::Dict(ref n) => Some(n),
            _ => None,
        }
    }

    pub fn list_mut(&mut self) -> Option<&mut Vec<BencodeMut<'a>>> {
        match self.inner {
            Inner::List(ref mut n) => Some(n),
            _ => None,
        }
    }

    pub fn dict_mut(&mut self) -> Option<&mut BTreeMap<Cow<'a, [u8]>, BencodeMut<'a>>> {
        match self.inner {
            Inner::Dict(ref mut n) => Some(n),
            _ => None,
        }
    }

    /// Encode the `BencodeMut` into a buffer representing the bencode.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = Vec::new();

        encode::encode(self, &mut buffer);

        buffer
    }
}

impl<'a, 'b> From<&'b BencodeRef<'a>> for BencodeMut<'a> {
    fn from(value: &'b BencodeRef<'a>) -> Self {
        if let Some(n) = value.int() {
            return BencodeMut::new_int(n);
        }

        if let Some(bytes) = value.bytes() {
            return BencodeMut::new_bytes(Cow::Borrowed(bytes));
        }

        if let Some(list) = value.list() {
            return BencodeMut::from_list(list.iter().map(BencodeMut::from).collect());
        }

        let dict = value
            .dict()
            .map(|dict| {
                dict.iter()
                    .map(|(key, value)| (Cow::Borrowed(*key), BencodeMut::from(value)))
                    .collect()
            })
            .unwrap_or_default();

        BencodeMut::from_dict(dict)
    }
}
