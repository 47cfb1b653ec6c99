//! Binary cache
//!
//! One directory per user holds one extracted release per platform that has
//! actually been run. Entries are never evicted; `pgdump cache clear` is the
//! only way they go away.

pub mod store;

pub use store::CacheStore;
