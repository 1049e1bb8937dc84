use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// The file the tracked hash is computed from, and where its descriptor goes.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Content {
    /// The file to hash.
    #[serde(default = "Content::default_file")]
    pub file: Option<Utf8PathBuf>,

    /// Bytes per piece.
    #[serde(default = "Content::default_piece_length")]
    pub piece_length: u64,

    /// Where the descriptor file is written. Nothing is written when unset.
    #[serde(default = "Content::default_torrent_file")]
    pub torrent_file: Option<Utf8PathBuf>,
}

impl Default for Content {
    fn default() -> Self {
        Self {
            file: Self::default_file(),
            piece_length: Self::default_piece_length(),
            torrent_file: Self::default_torrent_file(),
        }
    }
}

impl Content {
    fn default_file() -> Option<Utf8PathBuf> {
        None
    }

    fn default_piece_length() -> u64 {
        16_384
    }

    #[allow(clippy::unnecessary_wraps)]
    fn default_torrent_file() -> Option<Utf8PathBuf> {
        Some(Utf8PathBuf::from("file.torrent"))
    }
}
