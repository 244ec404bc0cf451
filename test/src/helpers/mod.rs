
pub use test_harness::TestHarness;
pub use test_protocol::{protocol, CHUNK_SIZE};
pub use test_terrain::TestTerrain;
