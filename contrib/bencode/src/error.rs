use thiserror::Error;

/// Errors raised while decoding bencode. Every variant means the input was not
/// a well formed encoding; `pos` is the byte offset where parsing gave up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BencodeParseError {
    #[error("Incomplete Number Of Bytes At {pos}")]
    BytesEmpty { pos: usize },

    #[error("Invalid Byte Found At {pos}")]
    InvalidByte { pos: usize },

    #[error("Invalid Integer Found With No Delimiter At {pos}")]
    InvalidIntNoDelimiter { pos: usize },

    #[error("Invalid Integer Found As Negative Zero At {pos}")]
    InvalidIntNegativeZero { pos: usize },

    #[error("Invalid Integer Found With Zero Padding At {pos}")]
    InvalidIntZeroPadding { pos: usize },

    #[error("Invalid Integer Found To Fail Parsing At {pos}")]
    InvalidIntParseError { pos: usize },

    #[error("Invalid Dictionary Key Ordering Found At {pos} For Key {key:?}")]
    InvalidKeyOrdering { pos: usize, key: Vec<u8> },

    #[error("Invalid Dictionary Duplicate Keys Found At {pos} For Key {key:?}")]
    InvalidKeyDuplicates { pos: usize, key: Vec<u8> },

    #[error("Invalid Byte Length Found As Negative At {pos}")]
    InvalidLengthNegative { pos: usize },

    #[error("Invalid Byte Length Found To Overflow Buffer Length At {pos}")]
    InvalidLengthOverflow { pos: usize },

    #[error("Invalid Recursion Limit Exceeded At {pos} For Limit {max}")]
    InvalidRecursionExceeded { pos: usize, max: usize },
}

/// Errors raised when a decoded value does not have the shape the caller asked for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BencodeConvertError {
    #[error("Missing Key In Bencode For {}", String::from_utf8_lossy(key))]
    MissingKey { key: Vec<u8> },

    #[error("Wrong Type In Bencode For {} Expected Type {expected_type}", String::from_utf8_lossy(key))]
    WrongType { key: Vec<u8>, expected_type: &'static str },
}

pub type BencodeParseResult<T> = Result<T, BencodeParseError>;

pub type BencodeConvertResult<T> = Result<T, BencodeConvertError>;
