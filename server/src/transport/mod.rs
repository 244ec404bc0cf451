use thiserror::Error;

use crate::SessionKey;

/// The session's channel refused or dropped the payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not send update to session {session:?}")]
pub struct SendError {
    pub session: SessionKey,
}

/// The channel's sending side has gone away
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Update channel closed")]
pub struct RecvError;

/// Hands encoded updates to the reliable, per-session channels owned by the
/// connection layer
pub trait UpdateSender: Send + Sync {
    fn send(&self, session: &SessionKey, payload: &[u8]) -> Result<(), SendError>;
}

cfg_if! {
    if #[cfg(feature = "transport_channel")] {
        mod channel;
        pub use channel::{UpdateChannel, UpdateReceiver};
    }
}
