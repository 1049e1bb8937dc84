use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::str;

use crate::error::{BencodeParseError, BencodeParseResult};
use crate::reference::bencode_ref::{BencodeRef, Inner};
use crate::reference::decode_opt::BDecodeOpt;

/// Decodes the value starting at `pos`, returning it and the position just past it.
pub fn decode(bytes: &[u8], pos: usize, opts: BDecodeOpt, depth: usize) -> BencodeParseResult<(BencodeRef<'_>, usize)> {
    if depth >= opts.max_recursion() {
        return Err(BencodeParseError::InvalidRecursionExceeded { pos, max: depth });
    }

    match peek_byte(bytes, pos)? {
        crate::INT_START => {
            let (bencode, next_pos) = decode_int(bytes, pos + 1, crate::BEN_END)?;
            Ok((Inner::Int(bencode, &bytes[pos..next_pos]).into(), next_pos))
        }
        crate::LIST_START => {
            let (bencode, next_pos) = decode_list(bytes, pos + 1, opts, depth)?;
            Ok((Inner::List(bencode, &bytes[pos..next_pos]).into(), next_pos))
        }
        crate::DICT_START => {
            let (bencode, next_pos) = decode_dict(bytes, pos + 1, opts, depth)?;
            Ok((Inner::Dict(bencode, &bytes[pos..next_pos]).into(), next_pos))
        }
        crate::BYTE_LEN_LOW..=crate::BYTE_LEN_HIGH => {
            // The length prefix belongs to the value, so decode from `pos` itself.
            let (bencode, next_pos) = decode_bytes(bytes, pos)?;
            Ok((Inner::Bytes(bencode, &bytes[pos..next_pos]).into(), next_pos))
        }
        _ => Err(BencodeParseError::InvalidByte { pos }),
    }
}

fn decode_int(bytes: &[u8], pos: usize, delim: u8) -> BencodeParseResult<(i64, usize)> {
    let begin_decode = bytes.get(pos..).unwrap_or_default();

    let Some(relative_end_pos) = begin_decode.iter().position(|n| *n == delim) else {
        return Err(BencodeParseError::InvalidIntNoDelimiter { pos });
    };
    let int_byte_slice = &begin_decode[..relative_end_pos];

    match int_byte_slice {
        [b'-', b'0', ..] => return Err(BencodeParseError::InvalidIntNegativeZero { pos }),
        [b'0', _, ..] => return Err(BencodeParseError::InvalidIntZeroPadding { pos }),
        _ => (),
    }

    // Only an optional minus sign and digits. `str::parse` would also take a `+`.
    let digits = int_byte_slice.strip_prefix(b"-").unwrap_or(int_byte_slice);
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(BencodeParseError::InvalidIntParseError { pos });
    }

    let value = str::from_utf8(int_byte_slice)
        .ok()
        .and_then(|int_str| int_str.parse::<i64>().ok())
        .ok_or(BencodeParseError::InvalidIntParseError { pos })?;

    // Skip the delimiter, the next byte starts the next value.
    Ok((value, pos + relative_end_pos + 1))
}

fn decode_bytes(bytes: &[u8], pos: usize) -> BencodeParseResult<(&[u8], usize)> {
    let (num_bytes, start_pos) = decode_int(bytes, pos, crate::BYTE_LEN_END)?;

    if num_bytes < 0 {
        return Err(BencodeParseError::InvalidLengthNegative { pos });
    }

    let num_bytes = usize::try_from(num_bytes).map_err(|_| BencodeParseError::InvalidLengthOverflow { pos })?;

    if num_bytes > bytes[start_pos..].len() {
        return Err(BencodeParseError::InvalidLengthOverflow { pos });
    }

    let next_pos = start_pos + num_bytes;
    Ok((&bytes[start_pos..next_pos], next_pos))
}

fn decode_list(bytes: &[u8], pos: usize, opts: BDecodeOpt, depth: usize) -> BencodeParseResult<(Vec<BencodeRef<'_>>, usize)> {
    let mut bencode_list = Vec::new();

    let mut curr_pos = pos;

    while peek_byte(bytes, curr_pos)? != crate::BEN_END {
        let (bencode, next_pos) = decode(bytes, curr_pos, opts, depth + 1)?;

        bencode_list.push(bencode);

        curr_pos = next_pos;
    }

    Ok((bencode_list, curr_pos + 1))
}

fn decode_dict(
    bytes: &[u8],
    pos: usize,
    opts: BDecodeOpt,
    depth: usize,
) -> BencodeParseResult<(BTreeMap<&[u8], BencodeRef<'_>>, usize)> {
    let mut bencode_dict = BTreeMap::new();
    let mut last_key: Option<&[u8]> = None;

    let mut curr_pos = pos;

    while peek_byte(bytes, curr_pos)? != crate::BEN_END {
        let (key_bytes, next_pos) = decode_bytes(bytes, curr_pos)?;

        if opts.check_key_sort() && last_key.is_some_and(|last_key| key_bytes < last_key) {
            return Err(BencodeParseError::InvalidKeyOrdering {
                pos: curr_pos,
                key: key_bytes.to_vec(),
            });
        }
        last_key = Some(key_bytes);
        curr_pos = next_pos;

        let (value, next_pos) = decode(bytes, curr_pos, opts, depth + 1)?;

        match bencode_dict.entry(key_bytes) {
            Entry::Vacant(n) => n.insert(value),
            Entry::Occupied(_) => {
                return Err(BencodeParseError::InvalidKeyDuplicates {
                    pos: curr_pos,
                    key: key_bytes.to_vec(),
                })
            }
        };

        curr_pos = next_pos;
    }

    Ok((bencode_dict, curr_pos + 1))
}

fn peek_byte(bytes: &[u8], pos: usize) -> BencodeParseResult<u8> {
    bytes.get(pos).copied().ok_or(BencodeParseError::BytesEmpty { pos })
}
