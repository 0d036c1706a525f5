//! Device inventory listing for the consultation UI.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use dermalink_core::store_keys;
use dermalink_storage::{ObjectStore, state};

use crate::error::CatalogError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Inventory as stored plus a by-category view for the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct Inventory {
    pub items: Vec<InventoryItem>,
    pub grouped: BTreeMap<String, Vec<InventoryItem>>,
}

/// Fetch the device inventory, grouped by category. Items without a
/// category land under "Other".
pub async fn load_inventory<S: ObjectStore>(store: &S) -> Result<Inventory, CatalogError> {
    let items: Vec<InventoryItem> = state::load_json(store, store_keys::INVENTORY).await?;

    let mut grouped: BTreeMap<String, Vec<InventoryItem>> = BTreeMap::new();
    for item in &items {
        let category = item
            .category
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "Other".to_string());
        grouped.entry(category).or_default().push(item.clone());
    }

    Ok(Inventory { items, grouped })
}

/// Look a device up by name, case-insensitive.
pub async fn find_device<S: ObjectStore>(
    store: &S,
    name: &str,
) -> Result<Option<InventoryItem>, CatalogError> {
    let items: Vec<InventoryItem> = state::load_json(store, store_keys::INVENTORY).await?;
    let needle = name.to_lowercase();
    Ok(items.into_iter().find(|i| i.name.to_lowercase() == needle))
}

#[cfg(test)]
mod tests {
    use dermalink_storage::memory::MemoryStore;

    use super::*;

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .put_object(
                store_keys::INVENTORY,
                br#"[
                    {"id": "dev_1", "name": "Ulthera", "category": "HIFU"},
                    {"id": "dev_2", "name": "Thermage", "category": "RF"},
                    {"id": "dev_3", "name": "LDM"}
                ]"#
                .to_vec(),
            )
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn groups_by_category_with_other_bucket() {
        let store = seeded_store().await;
        let inventory = load_inventory(&store).await.unwrap();

        assert_eq!(inventory.items.len(), 3);
        assert_eq!(inventory.grouped["HIFU"].len(), 1);
        assert_eq!(inventory.grouped["Other"][0].name, "LDM");
    }

    #[tokio::test]
    async fn find_device_is_case_insensitive() {
        let store = seeded_store().await;
        let device = find_device(&store, "ULTHERA").await.unwrap();
        assert_eq!(device.unwrap().id, "dev_1");
        assert!(find_device(&store, "Fraxel").await.unwrap().is_none());
    }
}
