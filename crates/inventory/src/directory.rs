//! Warehouse and catalog CRUD services.

use std::sync::Arc;

use stockroom_core::{DomainError, Envelope, PageRequest, WarehouseId, WarehouseItemId};

use crate::item::{
    CreateItemRequest, TopItemsDto, UpdateItemRequest, WarehouseItemDto, TOP_ITEMS_LIMIT,
};
use crate::store::{WarehouseItemStore, WarehouseStore};
use crate::warehouse::{CreateWarehouseRequest, UpdateWarehouseRequest, Warehouse, WarehouseDto};
use crate::WarehouseItem;

fn log_store_failure(err: &DomainError, operation: &str, identifier: &str) {
    if let DomainError::Store(store_err) = err {
        tracing::error!(error = %store_err, identifier = %identifier, "{} failed", operation);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Warehouses
// ─────────────────────────────────────────────────────────────────────────────

/// CRUD over warehouses.
pub struct WarehouseDirectory {
    warehouses: Arc<dyn WarehouseStore>,
    items: Arc<dyn WarehouseItemStore>,
}

impl WarehouseDirectory {
    pub fn new(warehouses: Arc<dyn WarehouseStore>, items: Arc<dyn WarehouseItemStore>) -> Self {
        Self { warehouses, items }
    }

    pub async fn get(&self, id: WarehouseId) -> Envelope<WarehouseDto> {
        match self.try_get(id).await {
            Ok(dto) => Envelope::ok(dto),
            Err(err) => {
                log_store_failure(&err, "get warehouse", &id.to_string());
                Envelope::from_domain_error(&err, "An error occurred while retrieving the warehouse.")
            }
        }
    }

    pub async fn list(
        &self,
        page: &PageRequest,
        filter: Option<&str>,
    ) -> Envelope<Vec<WarehouseDto>> {
        match self.try_list(page, filter).await {
            Ok((dtos, info)) => Envelope::paged(dtos, info),
            Err(err) => {
                log_store_failure(&err, "list warehouses", filter.unwrap_or("all"));
                Envelope::from_domain_error(&err, "An error occurred while retrieving warehouses.")
            }
        }
    }

    pub async fn create(&self, request: CreateWarehouseRequest) -> Envelope<WarehouseDto> {
        let name = request.name.clone();
        match self.try_create(request).await {
            Ok(dto) => Envelope::success(dto, "Warehouse created successfully."),
            Err(err) => {
                log_store_failure(&err, "create warehouse", &name);
                Envelope::from_domain_error(&err, "An error occurred while creating the warehouse.")
            }
        }
    }

    pub async fn update(
        &self,
        id: WarehouseId,
        request: UpdateWarehouseRequest,
    ) -> Envelope<WarehouseDto> {
        match self.try_update(id, request).await {
            Ok(dto) => Envelope::success(dto, "Warehouse updated successfully."),
            Err(err) => {
                log_store_failure(&err, "update warehouse", &id.to_string());
                Envelope::from_domain_error(&err, "An error occurred while updating the warehouse.")
            }
        }
    }

    pub async fn delete(&self, id: WarehouseId) -> Envelope<bool> {
        match self.try_delete(id).await {
            Ok(()) => Envelope::success(true, "Warehouse deleted successfully."),
            Err(err) => {
                log_store_failure(&err, "delete warehouse", &id.to_string());
                Envelope::from_domain_error(&err, "An error occurred while deleting the warehouse.")
            }
        }
    }

    async fn try_get(&self, id: WarehouseId) -> Result<WarehouseDto, DomainError> {
        let warehouse = self
            .warehouses
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Warehouse not found."))?;
        let items_count = self.items.count_for_warehouse(id).await?;
        Ok(WarehouseDto::from_entity(&warehouse, items_count))
    }

    async fn try_list(
        &self,
        page: &PageRequest,
        filter: Option<&str>,
    ) -> Result<(Vec<WarehouseDto>, stockroom_core::PageInfo), DomainError> {
        let result = self.warehouses.list(page, filter).await?;
        let info = result.info(page);

        let mut dtos = Vec::with_capacity(result.items.len());
        for warehouse in &result.items {
            let items_count = self.items.count_for_warehouse(warehouse.id).await?;
            dtos.push(WarehouseDto::from_entity(warehouse, items_count));
        }
        Ok((dtos, info))
    }

    async fn try_create(&self, request: CreateWarehouseRequest) -> Result<WarehouseDto, DomainError> {
        request.validate()?;

        if self.warehouses.name_taken(&request.name).await? {
            return Err(DomainError::already_exists("Warehouse name already exists."));
        }

        let warehouse = Warehouse::new(request.name, request.address, request.city, request.country);
        let dto = WarehouseDto::from_entity(&warehouse, 0);
        self.warehouses.insert(warehouse).await?;
        Ok(dto)
    }

    async fn try_update(
        &self,
        id: WarehouseId,
        request: UpdateWarehouseRequest,
    ) -> Result<WarehouseDto, DomainError> {
        request.validate()?;

        let mut warehouse = self
            .warehouses
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Warehouse not found."))?;

        if warehouse.name != request.name && self.warehouses.name_taken(&request.name).await? {
            return Err(DomainError::already_exists("Warehouse name already exists."));
        }

        warehouse.name = request.name;
        warehouse.address = request.address;
        warehouse.city = request.city;
        warehouse.country = request.country;
        self.warehouses.update(&warehouse).await?;

        let items_count = self.items.count_for_warehouse(id).await?;
        Ok(WarehouseDto::from_entity(&warehouse, items_count))
    }

    async fn try_delete(&self, id: WarehouseId) -> Result<(), DomainError> {
        if self.warehouses.find(id).await?.is_none() {
            return Err(DomainError::not_found("Warehouse not found."));
        }

        // A warehouse takes its items with it.
        self.items.remove_by_warehouse(id).await?;
        self.warehouses.remove(id).await?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Items
// ─────────────────────────────────────────────────────────────────────────────

/// CRUD over warehouse items, plus the top-items report.
pub struct CatalogDirectory {
    items: Arc<dyn WarehouseItemStore>,
    warehouses: Arc<dyn WarehouseStore>,
}

impl CatalogDirectory {
    pub fn new(items: Arc<dyn WarehouseItemStore>, warehouses: Arc<dyn WarehouseStore>) -> Self {
        Self { items, warehouses }
    }

    pub async fn get(&self, id: WarehouseItemId) -> Envelope<WarehouseItemDto> {
        match self.try_get(id).await {
            Ok(dto) => Envelope::ok(dto),
            Err(err) => {
                log_store_failure(&err, "get item", &id.to_string());
                Envelope::from_domain_error(
                    &err,
                    "An error occurred while retrieving the warehouse item.",
                )
            }
        }
    }

    pub async fn list(
        &self,
        page: &PageRequest,
        filter: Option<&str>,
    ) -> Envelope<Vec<WarehouseItemDto>> {
        match self.items.list(page, filter).await {
            Ok(result) => {
                let info = result.info(page);
                let dtos = result.items.iter().map(WarehouseItemDto::from).collect();
                Envelope::paged(dtos, info)
            }
            Err(err) => {
                let err = DomainError::from(err);
                log_store_failure(&err, "list items", filter.unwrap_or("all"));
                Envelope::from_domain_error(
                    &err,
                    "An error occurred while retrieving warehouse items.",
                )
            }
        }
    }

    pub async fn create(&self, request: CreateItemRequest) -> Envelope<WarehouseItemDto> {
        let name = request.item_name.clone();
        match self.try_create(request).await {
            Ok(dto) => Envelope::success(dto, "Warehouse item created successfully."),
            Err(err) => {
                log_store_failure(&err, "create item", &name);
                Envelope::from_domain_error(
                    &err,
                    "An error occurred while creating the warehouse item.",
                )
            }
        }
    }

    pub async fn update(
        &self,
        id: WarehouseItemId,
        request: UpdateItemRequest,
    ) -> Envelope<WarehouseItemDto> {
        match self.try_update(id, request).await {
            Ok(dto) => Envelope::success(dto, "Warehouse item updated successfully."),
            Err(err) => {
                log_store_failure(&err, "update item", &id.to_string());
                Envelope::from_domain_error(
                    &err,
                    "An error occurred while updating the warehouse item.",
                )
            }
        }
    }

    pub async fn delete(&self, id: WarehouseItemId) -> Envelope<bool> {
        match self.try_delete(id).await {
            Ok(()) => Envelope::success(true, "Warehouse item deleted successfully."),
            Err(err) => {
                log_store_failure(&err, "delete item", &id.to_string());
                Envelope::from_domain_error(
                    &err,
                    "An error occurred while deleting the warehouse item.",
                )
            }
        }
    }

    /// Ten highest- and ten lowest-quantity items across all warehouses.
    pub async fn top_items(&self) -> Envelope<TopItemsDto> {
        match self.try_top_items().await {
            Ok(dto) => Envelope::ok(dto),
            Err(err) => {
                log_store_failure(&err, "top items", "all");
                Envelope::from_domain_error(&err, "An error occurred while retrieving top items.")
            }
        }
    }

    async fn try_get(&self, id: WarehouseItemId) -> Result<WarehouseItemDto, DomainError> {
        let item = self
            .items
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Warehouse item not found."))?;
        Ok(WarehouseItemDto::from(&item))
    }

    async fn try_create(&self, request: CreateItemRequest) -> Result<WarehouseItemDto, DomainError> {
        request.validate()?;

        if self.warehouses.find(request.warehouse_id).await?.is_none() {
            return Err(DomainError::not_found("Warehouse not found."));
        }

        if self
            .items
            .name_taken_in(request.warehouse_id, &request.item_name)
            .await?
        {
            return Err(DomainError::already_exists(
                "An item with this name already exists in the warehouse.",
            ));
        }

        let item = WarehouseItem {
            id: WarehouseItemId::new(),
            item_name: request.item_name,
            sku_code: request.sku_code,
            quantity: request.quantity,
            cost_price: request.cost_price,
            msrp_price: request.msrp_price,
            warehouse_id: request.warehouse_id,
        };
        let dto = WarehouseItemDto::from(&item);
        self.items.insert(item).await?;
        Ok(dto)
    }

    async fn try_update(
        &self,
        id: WarehouseItemId,
        request: UpdateItemRequest,
    ) -> Result<WarehouseItemDto, DomainError> {
        request.validate()?;

        let mut item = self
            .items
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Warehouse item not found."))?;

        if item.item_name != request.item_name
            && self
                .items
                .name_taken_in(item.warehouse_id, &request.item_name)
                .await?
        {
            return Err(DomainError::already_exists(
                "An item with this name already exists in the warehouse.",
            ));
        }

        item.item_name = request.item_name;
        item.sku_code = request.sku_code;
        item.quantity = request.quantity;
        item.cost_price = request.cost_price;
        item.msrp_price = request.msrp_price;
        self.items.update(&item).await?;

        Ok(WarehouseItemDto::from(&item))
    }

    async fn try_delete(&self, id: WarehouseItemId) -> Result<(), DomainError> {
        if self.items.find(id).await?.is_none() {
            return Err(DomainError::not_found("Warehouse item not found."));
        }
        self.items.remove(id).await?;
        Ok(())
    }

    async fn try_top_items(&self) -> Result<TopItemsDto, DomainError> {
        let high = self.items.top_by_quantity(TOP_ITEMS_LIMIT, true).await?;
        let low = self.items.top_by_quantity(TOP_ITEMS_LIMIT, false).await?;
        Ok(TopItemsDto {
            top_high_items: high.iter().map(WarehouseItemDto::from).collect(),
            top_low_items: low.iter().map(WarehouseItemDto::from).collect(),
        })
    }
}
