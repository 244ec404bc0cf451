mod session;
mod session_ref;

pub use session::SessionKey;
pub(crate) use session::Session;
pub use session_ref::{SessionMut, SessionRef};
