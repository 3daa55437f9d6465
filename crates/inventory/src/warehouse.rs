//! Warehouse entity and DTOs.

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, Entity, WarehouseId};

/// Storage site holding items.
///
/// # Invariants
/// - `name` is unique across warehouses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
}

impl Warehouse {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: WarehouseId::new(),
            name: name.into(),
            address: address.into(),
            city: city.into(),
            country: country.into(),
        }
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!(
            "Warehouse {field} is required."
        )));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Wire representation of a warehouse plus its current item count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarehouseDto {
    pub id: WarehouseId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub items_count: u64,
}

impl WarehouseDto {
    pub fn from_entity(warehouse: &Warehouse, items_count: u64) -> Self {
        Self {
            id: warehouse.id,
            name: warehouse.name.clone(),
            address: warehouse.address.clone(),
            city: warehouse.city.clone(),
            country: warehouse.country.clone(),
            items_count,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWarehouseRequest {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
}

impl CreateWarehouseRequest {
    /// All fields are required and must be non-blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        require("name", &self.name)?;
        require("address", &self.address)?;
        require("city", &self.city)?;
        require("country", &self.country)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWarehouseRequest {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
}

impl UpdateWarehouseRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("name", &self.name)?;
        require("address", &self.address)?;
        require("city", &self.city)?;
        require("country", &self.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_fail_validation() {
        let request = CreateWarehouseRequest {
            name: "Central".to_string(),
            address: "  ".to_string(),
            city: "Oslo".to_string(),
            country: "Norway".to_string(),
        };
        let err = request.validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Warehouse address is required.");
    }

    #[test]
    fn complete_request_passes_validation() {
        let request = CreateWarehouseRequest {
            name: "Central".to_string(),
            address: "Main St 1".to_string(),
            city: "Oslo".to_string(),
            country: "Norway".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
