//! Session tokens, roles, and the session-provider seam

mod session;

pub use session::*;
