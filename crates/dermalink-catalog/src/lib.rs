//! dermalink-catalog
//!
//! Read-only access to the externally owned knowledge store: the protocol
//! catalog, the provider-offering roster, the trending-keyword list, and the
//! device inventory. The store's schema drifts independently of this code,
//! so every record is deserialized through a defaults-tolerant raw form and
//! no entry is ever discarded for being incomplete.

pub mod error;
pub mod inventory;
pub mod loader;
pub mod records;

pub use loader::{CatalogSnapshot, load_catalog, load_trending};
