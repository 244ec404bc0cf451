use log::debug;

use crate::{MarkerKind, MarkerKinds};

pub mod error;
pub use error::ProtocolError;

pub const DEFAULT_CHUNK_SIZE: u32 = 32;
const MAX_CHUNK_SIZE: u32 = 1 << 15;

// Protocol
/// Settings which client & server must agree on
#[derive(Clone)]
pub struct Protocol {
    pub marker_kinds: MarkerKinds,
    /// Edge length of a chunk, in tiles
    pub chunk_size: u32,
    locked: bool,
}

impl Default for Protocol {
    fn default() -> Self {
        Self {
            marker_kinds: MarkerKinds::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            locked: false,
        }
    }
}

impl Protocol {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn chunk_size(&mut self, chunk_size: u32) -> &mut Self {
        if let Err(err) = self.try_chunk_size(chunk_size) {
            panic!("{}", err);
        }
        self
    }

    pub fn add_marker_kind(&mut self, name: &str) -> &mut Self {
        self.check_lock();
        if let Err(err) = self.marker_kinds.try_add_kind(name) {
            panic!("{}", err);
        }
        self
    }

    /// Registers every name in order
    pub fn add_marker_kinds<'n>(&mut self, names: impl IntoIterator<Item = &'n str>) -> &mut Self {
        for name in names {
            self.add_marker_kind(name);
        }
        self
    }

    pub fn marker_kind(&self, name: &str) -> Option<MarkerKind> {
        self.marker_kinds.kind_of(name)
    }

    // Non-panicking builder methods

    pub fn try_chunk_size(&mut self, chunk_size: u32) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
            return Err(ProtocolError::InvalidChunkSize {
                size: chunk_size,
                max: MAX_CHUNK_SIZE,
            });
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    pub fn try_add_marker_kind(&mut self, name: &str) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        self.marker_kinds.try_add_kind(name)?;
        Ok(self)
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
        debug!(
            "protocol locked with {} marker kinds, chunk size {}",
            self.marker_kinds.len(),
            self.chunk_size
        );
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns Err if protocol is locked
    pub fn try_check_lock(&self) -> Result<(), ProtocolError> {
        if self.locked {
            Err(ProtocolError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    pub fn check_lock(&self) {
        if self.locked {
            panic!("Protocol already locked!");
        }
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }
}
