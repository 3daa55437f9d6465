//! In-memory store implementations.
//!
//! Intended for tests/dev. Not optimized for performance. Filtering,
//! ordering and windowing delegate to `stockroom_core::paging` so both
//! backends share the same counting semantics.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use stockroom_auth::{Account, AccountStore};
use stockroom_core::{
    paginate, AccountId, Page, PageRequest, StoreError, WarehouseId, WarehouseItemId,
};
use stockroom_inventory::{Warehouse, WarehouseItem, WarehouseItemStore, WarehouseStore};

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

/// Substring match on a designated text field; blank filters match all.
fn matches_filter(value: &str, filter: Option<&str>) -> bool {
    match filter {
        Some(f) if !f.trim().is_empty() => value.contains(f),
        _ => true,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Accounts
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts
            .values()
            .find(|a| a.refresh_token.as_deref() == Some(token))
            .cloned())
    }

    async fn email_taken(&self, email: &str) -> Result<bool, StoreError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts.values().any(|a| a.email == email))
    }

    async fn insert(&self, account: Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().map_err(|_| poisoned())?;
        accounts.insert(account.id, account);
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().map_err(|_| poisoned())?;
        accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn remove(&self, id: AccountId) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().map_err(|_| poisoned())?;
        accounts.remove(&id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(all)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Warehouses
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct InMemoryWarehouseStore {
    warehouses: RwLock<HashMap<WarehouseId, Warehouse>>,
}

impl InMemoryWarehouseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WarehouseStore for InMemoryWarehouseStore {
    async fn find(&self, id: WarehouseId) -> Result<Option<Warehouse>, StoreError> {
        let warehouses = self.warehouses.read().map_err(|_| poisoned())?;
        Ok(warehouses.get(&id).cloned())
    }

    async fn name_taken(&self, name: &str) -> Result<bool, StoreError> {
        let warehouses = self.warehouses.read().map_err(|_| poisoned())?;
        Ok(warehouses.values().any(|w| w.name == name))
    }

    async fn insert(&self, warehouse: Warehouse) -> Result<(), StoreError> {
        let mut warehouses = self.warehouses.write().map_err(|_| poisoned())?;
        warehouses.insert(warehouse.id, warehouse);
        Ok(())
    }

    async fn update(&self, warehouse: &Warehouse) -> Result<(), StoreError> {
        let mut warehouses = self.warehouses.write().map_err(|_| poisoned())?;
        warehouses.insert(warehouse.id, warehouse.clone());
        Ok(())
    }

    async fn remove(&self, id: WarehouseId) -> Result<(), StoreError> {
        let mut warehouses = self.warehouses.write().map_err(|_| poisoned())?;
        warehouses.remove(&id);
        Ok(())
    }

    async fn list(
        &self,
        page: &PageRequest,
        filter: Option<&str>,
    ) -> Result<Page<Warehouse>, StoreError> {
        let warehouses = self.warehouses.read().map_err(|_| poisoned())?;
        let mut filtered: Vec<Warehouse> = warehouses
            .values()
            .filter(|w| matches_filter(&w.name, filter))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.name.cmp(&b.name));
        if page.sort_desc {
            filtered.reverse();
        }
        Ok(paginate(&filtered, page))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Warehouse items
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct InMemoryWarehouseItemStore {
    items: RwLock<HashMap<WarehouseItemId, WarehouseItem>>,
}

impl InMemoryWarehouseItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WarehouseItemStore for InMemoryWarehouseItemStore {
    async fn find(&self, id: WarehouseItemId) -> Result<Option<WarehouseItem>, StoreError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items.get(&id).cloned())
    }

    async fn name_taken_in(
        &self,
        warehouse_id: WarehouseId,
        item_name: &str,
    ) -> Result<bool, StoreError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items
            .values()
            .any(|i| i.warehouse_id == warehouse_id && i.item_name == item_name))
    }

    async fn insert(&self, item: WarehouseItem) -> Result<(), StoreError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.insert(item.id, item);
        Ok(())
    }

    async fn update(&self, item: &WarehouseItem) -> Result<(), StoreError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.insert(item.id, item.clone());
        Ok(())
    }

    async fn remove(&self, id: WarehouseItemId) -> Result<(), StoreError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.remove(&id);
        Ok(())
    }

    async fn remove_by_warehouse(&self, warehouse_id: WarehouseId) -> Result<(), StoreError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.retain(|_, i| i.warehouse_id != warehouse_id);
        Ok(())
    }

    async fn list(
        &self,
        page: &PageRequest,
        filter: Option<&str>,
    ) -> Result<Page<WarehouseItem>, StoreError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        let mut filtered: Vec<WarehouseItem> = items
            .values()
            .filter(|i| matches_filter(&i.item_name, filter))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.item_name.cmp(&b.item_name));
        if page.sort_desc {
            filtered.reverse();
        }
        Ok(paginate(&filtered, page))
    }

    async fn count_for_warehouse(&self, warehouse_id: WarehouseId) -> Result<u64, StoreError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items
            .values()
            .filter(|i| i.warehouse_id == warehouse_id)
            .count() as u64)
    }

    async fn top_by_quantity(
        &self,
        limit: usize,
        desc: bool,
    ) -> Result<Vec<WarehouseItem>, StoreError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        let mut all: Vec<WarehouseItem> = items.values().cloned().collect();
        all.sort_by_key(|i| i.quantity);
        if desc {
            all.reverse();
        }
        all.truncate(limit);
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: i64, warehouse_id: WarehouseId) -> WarehouseItem {
        WarehouseItem {
            id: WarehouseItemId::new(),
            item_name: name.to_string(),
            sku_code: format!("SKU-{name}"),
            quantity,
            cost_price: 100,
            msrp_price: None,
            warehouse_id,
        }
    }

    #[tokio::test]
    async fn refresh_token_lookup_is_exact() {
        let store = InMemoryAccountStore::new();
        let mut account = Account::new("a@x.com", "A", "hash", None, true);
        account.refresh_token = Some("token-1".to_string());
        store.insert(account.clone()).await.unwrap();

        let found = store.find_by_refresh_token("token-1").await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(account.id));
        assert!(store.find_by_refresh_token("token-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_orders_and_windows_by_name() {
        let store = InMemoryWarehouseStore::new();
        for name in ["Delta", "Alpha", "Charlie", "Bravo"] {
            store
                .insert(Warehouse::new(name, "addr", "city", "country"))
                .await
                .unwrap();
        }

        let page = store.list(&PageRequest::new(0, 2), None).await.unwrap();
        let names: Vec<&str> = page.items.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Bravo"]);
        assert_eq!(page.total_count, 4);

        let desc = PageRequest {
            sort_desc: true,
            ..PageRequest::new(0, 2)
        };
        let page = store.list(&desc, None).await.unwrap();
        let names: Vec<&str> = page.items.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["Delta", "Charlie"]);
    }

    #[tokio::test]
    async fn filter_restricts_the_counted_set() {
        let store = InMemoryWarehouseItemStore::new();
        let warehouse_id = WarehouseId::new();
        for name in ["bolt", "nut", "bolt cutter"] {
            store.insert(item(name, 1, warehouse_id)).await.unwrap();
        }

        let page = store
            .list(&PageRequest::default(), Some("bolt"))
            .await
            .unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.items.len(), 2);

        // Blank filters match everything.
        let page = store.list(&PageRequest::default(), Some("  ")).await.unwrap();
        assert_eq!(page.total_count, 3);
    }

    #[tokio::test]
    async fn top_by_quantity_orders_both_ways() {
        let store = InMemoryWarehouseItemStore::new();
        let warehouse_id = WarehouseId::new();
        for (name, quantity) in [("a", 5), ("b", 50), ("c", 1)] {
            store.insert(item(name, quantity, warehouse_id)).await.unwrap();
        }

        let high = store.top_by_quantity(2, true).await.unwrap();
        assert_eq!(high.iter().map(|i| i.quantity).collect::<Vec<_>>(), [50, 5]);

        let low = store.top_by_quantity(2, false).await.unwrap();
        assert_eq!(low.iter().map(|i| i.quantity).collect::<Vec<_>>(), [1, 5]);
    }

    #[tokio::test]
    async fn removing_a_warehouse_clears_its_items() {
        let store = InMemoryWarehouseItemStore::new();
        let keep = WarehouseId::new();
        let doomed = WarehouseId::new();
        store.insert(item("kept", 1, keep)).await.unwrap();
        store.insert(item("dropped", 1, doomed)).await.unwrap();

        store.remove_by_warehouse(doomed).await.unwrap();
        assert_eq!(store.count_for_warehouse(doomed).await.unwrap(), 0);
        assert_eq!(store.count_for_warehouse(keep).await.unwrap(), 1);
    }
}
