mod error;
mod eval;
mod key;
mod store;

pub use error::StoreError;
pub use eval::{matches, predicate_matches};
pub use key::Key;
pub use store::Store;

#[cfg(feature = "memory")]
mod memory;

#[cfg(feature = "memory")]
pub use memory::MemoryStore;
