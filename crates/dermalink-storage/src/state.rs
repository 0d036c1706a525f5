//! JSON object helpers over any [`ObjectStore`].

use serde::{Serialize, de::DeserializeOwned};

use crate::ObjectStore;
use crate::error::StorageError;

/// Load and deserialize a JSON object.
pub async fn load_json<T, S>(store: &S, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned,
    S: ObjectStore,
{
    let body = store.get_object(key).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Serialize and store a JSON object.
pub async fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
    S: ObjectStore,
{
    let body = serde_json::to_vec(value)?;
    store.put_object(key, body).await
}
