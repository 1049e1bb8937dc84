use std::panic::Location;

use thiserror::Error;

/// `BitTorrent` Info Hash v1: the 20 byte content hash that identifies a swarm.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, PartialOrd, Ord)]
pub struct InfoHash(pub [u8; 20]);

pub const INFO_HASH_BYTES_LEN: usize = 20;

impl InfoHash {
    /// Returns the `InfoHash` internal byte array.
    #[must_use]
    pub fn bytes(&self) -> [u8; 20] {
        self.0
    }

    /// Returns the `InfoHash` as a lowercase hex string.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for InfoHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut chars = [0u8; 40];
        let hex = binascii::bin2hex(&self.0, &mut chars).map_err(|_| std::fmt::Error)?;
        f.write_str(std::str::from_utf8(hex).map_err(|_| std::fmt::Error)?)
    }
}

impl std::str::FromStr for InfoHash {
    type Err = binascii::ConvertError;

    /// Parses 40 hex characters, in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut i = Self([0u8; 20]);
        if s.len() != 40 {
            return Err(binascii::ConvertError::InvalidInputLength);
        }
        binascii::hex2bin(s.to_ascii_lowercase().as_bytes(), &mut i.0)?;
        Ok(i)
    }
}

impl From<[u8; 20]> for InfoHash {
    fn from(val: [u8; 20]) -> Self {
        InfoHash(val)
    }
}

/// Errors that can occur when converting a byte slice to an `InfoHash`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Not enough bytes for infohash. An infohash is 20 bytes.
    #[error("not enough bytes for infohash: {message} {location}")]
    NotEnoughBytes {
        location: &'static Location<'static>,
        message: String,
    },
    /// Too many bytes for infohash. An infohash is 20 bytes.
    #[error("too many bytes for infohash: {message} {location}")]
    TooManyBytes {
        location: &'static Location<'static>,
        message: String,
    },
}

impl TryFrom<&[u8]> for InfoHash {
    type Error = ConversionError;

    #[track_caller]
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let message = format!("got {} bytes, expected {}", bytes.len(), INFO_HASH_BYTES_LEN);

        match <[u8; INFO_HASH_BYTES_LEN]>::try_from(bytes) {
            Ok(data) => Ok(Self(data)),
            Err(_) if bytes.len() < INFO_HASH_BYTES_LEN => Err(ConversionError::NotEnoughBytes {
                location: Location::caller(),
                message,
            }),
            Err(_) => Err(ConversionError::TooManyBytes {
                location: Location::caller(),
                message,
            }),
        }
    }
}

impl TryFrom<Vec<u8>> for InfoHash {
    type Error = ConversionError;

    #[track_caller]
    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(bytes.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{ConversionError, InfoHash};

    #[test]
    fn an_info_hash_should_be_displayed_as_a_lowercase_hex_string() {
        let info_hash = InfoHash([0xAB; 20]);

        assert_eq!(info_hash.to_string(), "abababababababababababababababababababab");
    }

    #[test]
    fn an_info_hash_can_be_parsed_from_hex_in_either_case() {
        let lower = InfoHash::from_str("3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0").unwrap();
        let upper = InfoHash::from_str("3B245504CF5F11BBDBE1201CEA6A6BF45AEE1BC0").unwrap();

        assert_eq!(lower, upper);
        assert_eq!(lower.0[0], 0x3b);
    }

    #[test]
    fn an_info_hash_should_not_be_parsed_from_a_short_or_non_hex_string() {
        assert!(InfoHash::from_str("3b245504cf5f11bbdbe1201cea6a6bf45aee1bc").is_err());
        assert!(InfoHash::from_str("zz245504cf5f11bbdbe1201cea6a6bf45aee1bc0").is_err());
    }

    #[test]
    fn an_info_hash_should_only_be_built_from_exactly_twenty_bytes() {
        assert!(InfoHash::try_from(&[0u8; 20][..]).is_ok());
        assert!(matches!(
            InfoHash::try_from(&[0u8; 19][..]),
            Err(ConversionError::NotEnoughBytes { .. })
        ));
        assert!(matches!(
            InfoHash::try_from(vec![0u8; 21]),
            Err(ConversionError::TooManyBytes { .. })
        ));
    }
}
