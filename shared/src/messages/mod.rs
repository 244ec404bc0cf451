mod chunk_update;

pub use chunk_update::{ChunkSnapshot, ChunkUpdate};
