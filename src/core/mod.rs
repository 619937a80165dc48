//! In-memory record store and query engine.

/// Paginated, filtered reads over a store.
pub mod query;
/// Sample records the service starts with.
pub mod seed;
/// Authoritative person store.
pub mod store;
