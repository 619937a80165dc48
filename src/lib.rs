//! In-memory personnel roster with paginated queries, spreadsheet export and a JSON HTTP surface.
//!
//! # Examples
//!
//! Querying a store directly:
//! ```
//! use roster::{
//!     core::{query::{self, PageRequest}, store::PersonStore},
//!     filter::PersonFilter,
//! };
//!
//! let store = PersonStore::seeded();
//! let page = query::query(&store, None, PageRequest::new(7, 3));
//! assert_eq!(page.people.len(), 6);
//! assert_eq!(page.total_pages, 3);
//!
//! let males = query::query(&store, Some(&PersonFilter::male()), PageRequest::new(5, 1));
//! assert_eq!(males.total_items, 8);
//! ```
//!
//! Through the single-writer runtime:
//! ```
//! use roster::{
//!     core::store::PersonStore,
//!     runtime::handle::{spawn_roster, RuntimeConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let handle = spawn_roster(PersonStore::seeded(), RuntimeConfig::default());
//! let oldest = handle.oldest().await.expect("oldest");
//! assert_eq!(oldest.people[0].full_name(), "Frank Green");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Record store, seed data and query engine.
pub mod core;
/// Spreadsheet export.
pub mod export;
/// Serializable record filters.
pub mod filter;
/// Person records and drafts.
pub mod person;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Axum router and server loop.
pub mod serve;
/// Shared primitive types and enums.
pub mod types;
/// Boundary validation for create/update input.
pub mod validate;
