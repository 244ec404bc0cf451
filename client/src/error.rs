use thiserror::Error;

use tilemark_shared::{MarkerId, MarkerKind, SerdeErr, Tick};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Could not decode chunk update: {0}")]
    Decode(#[from] SerdeErr),
    #[error("Update for tick {tick} arrived after tick {last}")]
    StaleUpdate { tick: Tick, last: Tick },
    #[error("Marker {id:?} has kind {kind:?}, which the protocol does not define")]
    UnknownKind { id: MarkerId, kind: MarkerKind },
}
