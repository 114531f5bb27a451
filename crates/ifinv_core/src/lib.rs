//! # ifinv core
//!
//! In-memory inventory of network switch interfaces.
//!
//! This crate provides:
//! - The [`InterfaceRecord`] data model
//! - [`RecordStore`], an insertion-ordered, process-lifetime record collection
//! - The query engine ([`query`]) for sort/skip/limit over a record snapshot
//! - Seed dataset import and export ([`seed`])
//!
//! # Example
//!
//! ```
//! use ifinv_core::{InterfaceFields, QueryOptions, RecordStore, SortDirection, SortField};
//!
//! let store = RecordStore::new();
//! store.insert(InterfaceFields::new("sw-core-01", "Gi1/0/1", 10, 1000, "connected", ""));
//! store.insert(InterfaceFields::new("sw-core-01", "Gi1/0/2", 9, 1000, "down", ""));
//!
//! let options = QueryOptions::new()
//!     .sort_by(SortField::VlanId, SortDirection::Asc)
//!     .with_limit(1);
//! let page = ifinv_core::query(store.list_all(), &options);
//!
//! assert_eq!(page.total, 2);
//! assert_eq!(page.data.len(), 1);
//! // Text ordering: "10" sorts before "9".
//! assert_eq!(page.data[0].fields.vlan_id, 10);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
// Production code MUST NOT use panic!/unwrap()/expect()
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod error;
mod query;
mod record;
pub mod seed;
mod store;

pub use error::{CoreError, CoreResult};
pub use query::{query, QueryOptions, QueryPage, SortDirection, SortField, SortMode};
pub use record::{InterfaceFields, InterfaceRecord, RecordId};
pub use store::RecordStore;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
