pub mod error;
pub mod sessions;

pub use error::StoreError;
pub use sessions::{Session, SessionPatch, SessionStore, DEFAULT_MAX_AGE_HOURS};
