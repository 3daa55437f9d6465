//! Warehouse item entity and DTOs.
//!
//! Prices are integer minor units (cents).

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, Entity, WarehouseId, WarehouseItemId};

/// Quantity assumed when a new item does not specify one.
pub const DEFAULT_QUANTITY: i64 = 1;

/// Number of items returned on each side of the top-items report.
pub const TOP_ITEMS_LIMIT: usize = 10;

/// Stock line stored in a warehouse.
///
/// # Invariants
/// - `item_name` is unique within its warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseItem {
    pub id: WarehouseItemId,
    pub item_name: String,
    pub sku_code: String,
    pub quantity: i64,
    pub cost_price: u64,
    pub msrp_price: Option<u64>,
    pub warehouse_id: WarehouseId,
}

impl Entity for WarehouseItem {
    type Id = WarehouseItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("Item {field} is required.")));
    }
    Ok(())
}

fn default_quantity() -> i64 {
    DEFAULT_QUANTITY
}

// ─────────────────────────────────────────────────────────────────────────────
// DTOs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarehouseItemDto {
    pub id: WarehouseItemId,
    pub item_name: String,
    pub sku_code: String,
    pub quantity: i64,
    pub cost_price: u64,
    pub msrp_price: Option<u64>,
    pub warehouse_id: WarehouseId,
}

impl From<&WarehouseItem> for WarehouseItemDto {
    fn from(item: &WarehouseItem) -> Self {
        Self {
            id: item.id,
            item_name: item.item_name.clone(),
            sku_code: item.sku_code.clone(),
            quantity: item.quantity,
            cost_price: item.cost_price,
            msrp_price: item.msrp_price,
            warehouse_id: item.warehouse_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
    pub item_name: String,
    pub sku_code: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    pub cost_price: u64,
    pub msrp_price: Option<u64>,
    pub warehouse_id: WarehouseId,
}

impl CreateItemRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("name", &self.item_name)?;
        require("SKU code", &self.sku_code)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItemRequest {
    pub item_name: String,
    pub sku_code: String,
    pub quantity: i64,
    pub cost_price: u64,
    pub msrp_price: Option<u64>,
}

impl UpdateItemRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("name", &self.item_name)?;
        require("SKU code", &self.sku_code)
    }
}

/// Ten highest- and ten lowest-quantity items across all warehouses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopItemsDto {
    pub top_high_items: Vec<WarehouseItemDto>,
    pub top_low_items: Vec<WarehouseItemDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_defaults_quantity() {
        let json = serde_json::json!({
            "item_name": "Widget",
            "sku_code": "W-1",
            "cost_price": 250,
            "warehouse_id": "018f4b2d-0000-7000-8000-000000000000",
        });
        let request: CreateItemRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.quantity, DEFAULT_QUANTITY);
        assert_eq!(request.msrp_price, None);
    }

    #[test]
    fn blank_name_fails_validation() {
        let request = CreateItemRequest {
            item_name: String::new(),
            sku_code: "W-1".to_string(),
            quantity: 1,
            cost_price: 250,
            msrp_price: None,
            warehouse_id: stockroom_core::WarehouseId::new(),
        };
        let err = request.validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
