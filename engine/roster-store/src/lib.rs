//! # roster-store
//!
//! Storage collaborator for the roster coach engine. The engine never talks
//! to a database directly; it reads roster/projection snapshots and writes
//! its one cache artifact through the narrow [`RosterStore`] trait defined
//! here. [`InMemoryStore`] is the reference implementation, seedable from a
//! JSON snapshot document for demos and tests.

pub mod error;
pub mod snapshot;
pub mod store;

pub use error::{Result, StoreError};
pub use snapshot::StoreSnapshot;
pub use store::{InMemoryStore, RosterStore};

/// Current version of the roster-store crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
