mod viewer;
mod visible_chunks;

pub use viewer::{Viewer, ViewerKey};
pub use visible_chunks::visible_chunks;
