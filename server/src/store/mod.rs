mod chunk;
mod chunk_index;
mod dirty_chunks;
mod marker_store;

pub use chunk::Chunk;
pub use chunk_index::ChunkIndex;
pub use dirty_chunks::DirtyChunks;
pub use marker_store::MarkerStore;
