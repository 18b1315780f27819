//! Session storage: the voter id and campaign tags that outlive one signup.

mod error;
mod session;

pub use error::StoreError;
pub use session::{FileSessionStore, MemorySessionStore, SessionStore, remember_utm, voter};
