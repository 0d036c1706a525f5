//! dermalink-storage
//!
//! Object-store access behind the [`ObjectStore`] trait. Production traffic
//! goes through [`s3::S3Store`]; services and tests can run against
//! [`memory::MemoryStore`] without touching the network.

pub mod error;
pub mod memory;
pub mod s3;
pub mod state;

use std::future::Future;

use error::StorageError;

/// The seam between the recommendation core and whatever holds its bytes.
///
/// Keys are flat, `/`-separated paths (see `dermalink_core::store_keys`).
/// Listing returns keys in stable lexicographic order — callers rely on
/// that for reproducible tie-breaking.
pub trait ObjectStore: Send + Sync {
    fn get_object(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Vec<u8>, StorageError>> + Send;

    fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn list_keys(
        &self,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<String>, StorageError>> + Send;

    fn delete_object(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}
