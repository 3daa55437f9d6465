//! `stockroom-inventory` — warehouses and warehouse items.
//!
//! Entities, persistence contracts, and the CRUD directories. Storage
//! implementations live in `stockroom-infra`.

pub mod directory;
pub mod item;
pub mod store;
pub mod warehouse;

pub use directory::{CatalogDirectory, WarehouseDirectory};
pub use item::{
    CreateItemRequest, TopItemsDto, UpdateItemRequest, WarehouseItem, WarehouseItemDto,
    DEFAULT_QUANTITY, TOP_ITEMS_LIMIT,
};
pub use store::{WarehouseItemStore, WarehouseStore};
pub use warehouse::{CreateWarehouseRequest, UpdateWarehouseRequest, Warehouse, WarehouseDto};
