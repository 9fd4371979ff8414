pub mod backend;
pub mod key;
pub mod store;
pub mod type_bind;

// Re-export commonly used items
pub use backend::CacheBackend;
pub use key::CacheKey;
pub use store::{CacheError, CacheResult, CacheStore};
pub use type_bind::{BoundKey, CacheKeyBind};
