pub mod directory;
mod session;
mod store;

pub use directory::Directory;
pub use session::{InvalidSessionKey, Session, SessionKey};
pub use store::{MemoryStore, SessionStore, StoreError};
