use derive_more::Constructor;

/// Swarm statistics for one content hash, as reported in announce responses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Constructor)]
pub struct SwarmMetadata {
    /// The number of peers that have announced a `completed` event.
    pub downloaded: u32,
    /// The number of active peers with nothing left to download (seeders).
    pub complete: u32,
    /// The number of active peers still downloading (leechers).
    pub incomplete: u32,
}

impl SwarmMetadata {
    #[must_use]
    pub fn zeroed() -> Self {
        Self::default()
    }
}
