//! `stockroom-infra` — store implementations and seed data.
//!
//! Two interchangeable backends for the store traits defined in
//! `stockroom-auth` and `stockroom-inventory`: an in-memory one for
//! tests/dev and a Postgres one via `sqlx`.

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::{InMemoryAccountStore, InMemoryWarehouseItemStore, InMemoryWarehouseStore};
pub use postgres::{
    ensure_schema, PostgresAccountStore, PostgresWarehouseItemStore, PostgresWarehouseStore,
};
pub use seed::{seed_admin, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD};
