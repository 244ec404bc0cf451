use thiserror::Error;

/// Errors that can occur while building a Protocol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Protocol is locked and cannot be modified
    #[error("Protocol is already locked and cannot be modified. Protocol.lock() has been called and no further changes are allowed")]
    AlreadyLocked,

    /// Chunks must be at least one tile wide
    #[error("Chunk size must be between 1 and {max} tiles, got {size}")]
    InvalidChunkSize { size: u32, max: u32 },

    /// Every `MarkerKind` index is taken
    #[error("Cannot register more than {max} marker kinds")]
    TooManyMarkerKinds { max: usize },
}
