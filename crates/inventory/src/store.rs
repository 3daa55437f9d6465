//! Persistence contracts for warehouses and items.

use async_trait::async_trait;

use stockroom_core::{Page, PageRequest, StoreError, WarehouseId, WarehouseItemId};

use crate::{Warehouse, WarehouseItem};

/// Persistence collaborator for warehouses.
#[async_trait]
pub trait WarehouseStore: Send + Sync {
    async fn find(&self, id: WarehouseId) -> Result<Option<Warehouse>, StoreError>;

    async fn name_taken(&self, name: &str) -> Result<bool, StoreError>;

    async fn insert(&self, warehouse: Warehouse) -> Result<(), StoreError>;

    async fn update(&self, warehouse: &Warehouse) -> Result<(), StoreError>;

    async fn remove(&self, id: WarehouseId) -> Result<(), StoreError>;

    /// One page of warehouses, name-substring filtered and ordered by name.
    /// `total_count` reflects the filtered set before windowing.
    async fn list(
        &self,
        page: &PageRequest,
        filter: Option<&str>,
    ) -> Result<Page<Warehouse>, StoreError>;
}

/// Persistence collaborator for warehouse items.
#[async_trait]
pub trait WarehouseItemStore: Send + Sync {
    async fn find(&self, id: WarehouseItemId) -> Result<Option<WarehouseItem>, StoreError>;

    async fn name_taken_in(
        &self,
        warehouse_id: WarehouseId,
        item_name: &str,
    ) -> Result<bool, StoreError>;

    async fn insert(&self, item: WarehouseItem) -> Result<(), StoreError>;

    async fn update(&self, item: &WarehouseItem) -> Result<(), StoreError>;

    async fn remove(&self, id: WarehouseItemId) -> Result<(), StoreError>;

    /// Remove every item stored in `warehouse_id`.
    async fn remove_by_warehouse(&self, warehouse_id: WarehouseId) -> Result<(), StoreError>;

    /// One page of items, item-name-substring filtered and ordered by item
    /// name. `total_count` reflects the filtered set before windowing.
    async fn list(
        &self,
        page: &PageRequest,
        filter: Option<&str>,
    ) -> Result<Page<WarehouseItem>, StoreError>;

    async fn count_for_warehouse(&self, warehouse_id: WarehouseId) -> Result<u64, StoreError>;

    /// Up to `limit` items ordered by quantity, highest first when `desc`.
    async fn top_by_quantity(&self, limit: usize, desc: bool)
        -> Result<Vec<WarehouseItem>, StoreError>;
}
