//! Library for parsing and converting bencoded data.
//!
//! Encoding is canonical: dictionary keys are always written in ascending
//! byte order, so equal values always produce identical bytes. Decoding is
//! strict about integers and length prefixes and, by default, tolerant of
//! unsorted dictionary keys.
//!
//! # Examples
//!
//! Decoding bencoded data:
//!
//! ```rust
//!     use swarm_canary_contrib_bencode::{BencodeRef, BDecodeOpt};
//!
//!     let data = b"d8:intervali300ee"; // cspell:disable-line
//!     let bencode = BencodeRef::decode(data, BDecodeOpt::default()).unwrap();
//!
//!     assert_eq!(300, bencode.lookup_int(b"interval").unwrap());
//! ```
//!
//! Encoding bencoded data:
//!
//! ```rust
//!     use swarm_canary_contrib_bencode::{ben_bytes, ben_int, ben_map};
//!
//!     let message = (ben_map!{
//!         "interval" => ben_int!(300),
//!         "failure reason" => ben_bytes!("Invalid info hash.")
//!     }).encode();
//!
//!     let data = b"d14:failure reason18:Invalid info hash.8:intervali300ee"; // cspell:disable-line
//!     assert_eq!(&data[..], &message[..]);
//! ```

mod cow;
mod error;
mod mutable;
mod reference;

/// Traits for implementation functionality.
pub mod inner {
    pub use crate::cow::BCowConvert;
}

pub use crate::error::{BencodeConvertError, BencodeConvertResult, BencodeParseError, BencodeParseResult};
pub use crate::mutable::bencode_mut::BencodeMut;
pub use crate::reference::bencode_ref::BencodeRef;
pub use crate::reference::decode_opt::BDecodeOpt;

const BEN_END: u8 = b'e';
const DICT_START: u8 = b'd';
const LIST_START: u8 = b'l';
const INT_START: u8 = b'i';

const BYTE_LEN_LOW: u8 = b'0';
const BYTE_LEN_HIGH: u8 = b'9';
const BYTE_LEN_END: u8 = b':';

/// Canonically encodes `value`.
#[must_use]
pub fn encode(value: &BencodeMut<'_>) -> Vec<u8> {
    value.encode()
}

/// Decodes the first value in `bytes`, returning it with the number of bytes consumed.
///
/// Bytes after the first value are not an error; it is up to the caller to
/// decide whether they matter.
///
/// # Errors
///
/// Will return a `BencodeParseError` if the input does not start with a
/// well formed encoding.
pub fn decode(bytes: &[u8]) -> BencodeParseResult<(BencodeRef<'_>, usize)> {
    let bencode = BencodeRef::decode(bytes, BDecodeOpt::partial())?;
    let consumed = bencode.buffer().len();

    Ok((bencode, consumed))
}

/// Construct a `BencodeMut` map by supplying string references as keys and `BencodeMut` as values.
#[macro_export]
macro_rules! ben_map {
( $($key:expr => $val:expr),* ) => {
        {
            use $crate::BencodeMut;
            use $crate::inner::BCowConvert;

            #[allow(unused_mut)]
            let mut map = ::std::collections::BTreeMap::new();
            $(
                map.insert(BCowConvert::convert($key), $val);
            )*

            BencodeMut::from_dict(map)
        }
    }
}

/// Construct a `BencodeMut` list by supplying a list of `BencodeMut` values.
#[macro_export]
macro_rules! ben_list {
    ( $($ben:expr),* ) => {
        {
            use $crate::BencodeMut;

            BencodeMut::from_list(vec![$($ben),*])
        }
    }
}

/// Construct `BencodeMut` bytes by supplying a type convertible to `Cow<[u8]>`.
#[macro_export]
macro_rules! ben_bytes {
    ( $ben:expr ) => {{
        use $crate::inner::BCowConvert;
        use $crate::BencodeMut;

        BencodeMut::new_bytes(BCowConvert::convert($ben))
    }};
}

/// Construct a `BencodeMut` integer by supplying an `i64`.
#[macro_export]
macro_rules! ben_int {
    ( $ben:expr ) => {{
        use $crate::BencodeMut;

        BencodeMut::new_int($ben)
    }};
}
