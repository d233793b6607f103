//! Key-value cache contract with JSON helpers and an in-memory store.
//!
//! Keys are namespaced strings built with [`CacheKey`]; entries may carry a
//! time-to-live and can be removed one at a time or by prefix.

pub mod error;
pub mod key;
pub mod memory;
pub mod repository;

pub use error::{CacheError, Result};
pub use key::CacheKey;
pub use memory::InMemoryCacheRepository;
pub use repository::{CacheRepository, CacheRepositoryExt};
