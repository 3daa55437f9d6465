//! Postgres-backed store implementations.
//!
//! Runtime `sqlx` queries with manual row mapping. List queries express the
//! shared paging window as `ORDER BY … LIMIT … OFFSET` plus a `COUNT(*)`
//! over the filtered predicate, matching the in-memory backend's counting
//! semantics.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use stockroom_auth::{Account, AccountStore, Role};
use stockroom_core::{AccountId, Page, PageRequest, StoreError, WarehouseId, WarehouseItemId};
use stockroom_inventory::{Warehouse, WarehouseItem, WarehouseItemStore, WarehouseStore};

/// Create the schema when it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    const DDL: &[&str] = &[
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id UUID PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            full_name TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            active BOOLEAN NOT NULL,
            role TEXT,
            refresh_token TEXT,
            refresh_token_expires_at TIMESTAMPTZ
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS warehouses (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            address TEXT NOT NULL,
            city TEXT NOT NULL,
            country TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS warehouse_items (
            id UUID PRIMARY KEY,
            item_name TEXT NOT NULL,
            sku_code TEXT NOT NULL,
            quantity BIGINT NOT NULL DEFAULT 1,
            cost_price BIGINT NOT NULL,
            msrp_price BIGINT,
            warehouse_id UUID NOT NULL REFERENCES warehouses(id),
            UNIQUE (warehouse_id, item_name)
        )
        "#,
    ];

    for statement in DDL {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(unavailable)?;
    }
    Ok(())
}

fn unavailable(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

fn corrupt(err: impl std::fmt::Display) -> StoreError {
    StoreError::Corrupt(err.to_string())
}

/// `%…%` pattern for a non-blank substring filter.
fn like_pattern(filter: Option<&str>) -> Option<String> {
    let f = filter?.trim();
    if f.is_empty() {
        return None;
    }
    let escaped = f.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    Some(format!("%{escaped}%"))
}

fn order_keyword(desc: bool) -> &'static str {
    if desc { "DESC" } else { "ASC" }
}

// ─────────────────────────────────────────────────────────────────────────────
// Accounts
// ─────────────────────────────────────────────────────────────────────────────

pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ACCOUNT_COLUMNS: &str =
    "id, email, full_name, password_hash, active, role, refresh_token, refresh_token_expires_at";

fn account_from_row(row: &PgRow) -> Result<Account, StoreError> {
    let role: Option<String> = row.try_get("role").map_err(corrupt)?;
    let role = role.map(|r| r.parse::<Role>()).transpose().map_err(corrupt)?;

    Ok(Account {
        id: AccountId::from_uuid(row.try_get::<Uuid, _>("id").map_err(corrupt)?),
        email: row.try_get("email").map_err(corrupt)?,
        full_name: row.try_get("full_name").map_err(corrupt)?,
        password_hash: row.try_get("password_hash").map_err(corrupt)?,
        active: row.try_get("active").map_err(corrupt)?,
        role,
        refresh_token: row.try_get("refresh_token").map_err(corrupt)?,
        refresh_token_expires_at: row.try_get("refresh_token_expires_at").map_err(corrupt)?,
    })
}

impl PostgresAccountStore {
    async fn fetch_one_by(&self, column: &str, value: &str) -> Result<Option<Account>, StoreError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE {column} = $1");
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)?;
        row.as_ref().map(account_from_row).transpose()
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn find(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;
        row.as_ref().map(account_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        self.fetch_one_by("email", email).await
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<Account>, StoreError> {
        self.fetch_one_by("refresh_token", token).await
    }

    async fn email_taken(&self, email: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM accounts WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(unavailable)?;
        Ok(exists)
    }

    async fn insert(&self, account: Account) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO accounts (id, email, full_name, password_hash, active, role, \
             refresh_token, refresh_token_expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(account.id.as_uuid())
        .bind(&account.email)
        .bind(&account.full_name)
        .bind(&account.password_hash)
        .bind(account.active)
        .bind(account.role.map(|r| r.as_str()))
        .bind(&account.refresh_token)
        .bind(account.refresh_token_expires_at)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE accounts SET email = $2, full_name = $3, password_hash = $4, active = $5, \
             role = $6, refresh_token = $7, refresh_token_expires_at = $8 WHERE id = $1",
        )
        .bind(account.id.as_uuid())
        .bind(&account.email)
        .bind(&account.full_name)
        .bind(&account.password_hash)
        .bind(account.active)
        .bind(account.role.map(|r| r.as_str()))
        .bind(&account.refresh_token)
        .bind(account.refresh_token_expires_at)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(())
    }

    async fn remove(&self, id: AccountId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY email"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;
        rows.iter().map(account_from_row).collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Warehouses
// ─────────────────────────────────────────────────────────────────────────────

pub struct PostgresWarehouseStore {
    pool: PgPool,
}

impl PostgresWarehouseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn warehouse_from_row(row: &PgRow) -> Result<Warehouse, StoreError> {
    Ok(Warehouse {
        id: WarehouseId::from_uuid(row.try_get::<Uuid, _>("id").map_err(corrupt)?),
        name: row.try_get("name").map_err(corrupt)?,
        address: row.try_get("address").map_err(corrupt)?,
        city: row.try_get("city").map_err(corrupt)?,
        country: row.try_get("country").map_err(corrupt)?,
    })
}

#[async_trait]
impl WarehouseStore for PostgresWarehouseStore {
    async fn find(&self, id: WarehouseId) -> Result<Option<Warehouse>, StoreError> {
        let row = sqlx::query("SELECT id, name, address, city, country FROM warehouses WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)?;
        row.as_ref().map(warehouse_from_row).transpose()
    }

    async fn name_taken(&self, name: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM warehouses WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(unavailable)?;
        Ok(exists)
    }

    async fn insert(&self, warehouse: Warehouse) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO warehouses (id, name, address, city, country) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(warehouse.id.as_uuid())
        .bind(&warehouse.name)
        .bind(&warehouse.address)
        .bind(&warehouse.city)
        .bind(&warehouse.country)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(())
    }

    async fn update(&self, warehouse: &Warehouse) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE warehouses SET name = $2, address = $3, city = $4, country = $5 WHERE id = $1",
        )
        .bind(warehouse.id.as_uuid())
        .bind(&warehouse.name)
        .bind(&warehouse.address)
        .bind(&warehouse.city)
        .bind(&warehouse.country)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(())
    }

    async fn remove(&self, id: WarehouseId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM warehouses WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn list(
        &self,
        page: &PageRequest,
        filter: Option<&str>,
    ) -> Result<Page<Warehouse>, StoreError> {
        let pattern = like_pattern(filter);
        let order = order_keyword(page.sort_desc);

        let total: i64 = match &pattern {
            Some(p) => sqlx::query_scalar("SELECT COUNT(*) FROM warehouses WHERE name LIKE $1")
                .bind(p)
                .fetch_one(&self.pool)
                .await
                .map_err(unavailable)?,
            None => sqlx::query_scalar("SELECT COUNT(*) FROM warehouses")
                .fetch_one(&self.pool)
                .await
                .map_err(unavailable)?,
        };

        let rows = match &pattern {
            Some(p) => {
                let sql = format!(
                    "SELECT id, name, address, city, country FROM warehouses \
                     WHERE name LIKE $1 ORDER BY name {order} LIMIT $2 OFFSET $3"
                );
                sqlx::query(&sql)
                    .bind(p)
                    .bind(page.take() as i64)
                    .bind(page.skip() as i64)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(unavailable)?
            }
            None => {
                let sql = format!(
                    "SELECT id, name, address, city, country FROM warehouses \
                     ORDER BY name {order} LIMIT $1 OFFSET $2"
                );
                sqlx::query(&sql)
                    .bind(page.take() as i64)
                    .bind(page.skip() as i64)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(unavailable)?
            }
        };

        let items = rows
            .iter()
            .map(warehouse_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            items,
            total_count: total as u64,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Warehouse items
// ─────────────────────────────────────────────────────────────────────────────

pub struct PostgresWarehouseItemStore {
    pool: PgPool,
}

impl PostgresWarehouseItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ITEM_COLUMNS: &str =
    "id, item_name, sku_code, quantity, cost_price, msrp_price, warehouse_id";

fn item_from_row(row: &PgRow) -> Result<WarehouseItem, StoreError> {
    let cost_price: i64 = row.try_get("cost_price").map_err(corrupt)?;
    let msrp_price: Option<i64> = row.try_get("msrp_price").map_err(corrupt)?;

    Ok(WarehouseItem {
        id: WarehouseItemId::from_uuid(row.try_get::<Uuid, _>("id").map_err(corrupt)?),
        item_name: row.try_get("item_name").map_err(corrupt)?,
        sku_code: row.try_get("sku_code").map_err(corrupt)?,
        quantity: row.try_get("quantity").map_err(corrupt)?,
        cost_price: u64::try_from(cost_price).map_err(|_| corrupt("negative cost_price"))?,
        msrp_price: msrp_price
            .map(|p| u64::try_from(p).map_err(|_| corrupt("negative msrp_price")))
            .transpose()?,
        warehouse_id: WarehouseId::from_uuid(row.try_get::<Uuid, _>("warehouse_id").map_err(corrupt)?),
    })
}

#[async_trait]
impl WarehouseItemStore for PostgresWarehouseItemStore {
    async fn find(&self, id: WarehouseItemId) -> Result<Option<WarehouseItem>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM warehouse_items WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;
        row.as_ref().map(item_from_row).transpose()
    }

    async fn name_taken_in(
        &self,
        warehouse_id: WarehouseId,
        item_name: &str,
    ) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM warehouse_items WHERE warehouse_id = $1 AND item_name = $2)",
        )
        .bind(warehouse_id.as_uuid())
        .bind(item_name)
        .fetch_one(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(exists)
    }

    async fn insert(&self, item: WarehouseItem) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO warehouse_items (id, item_name, sku_code, quantity, cost_price, \
             msrp_price, warehouse_id) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(item.id.as_uuid())
        .bind(&item.item_name)
        .bind(&item.sku_code)
        .bind(item.quantity)
        .bind(item.cost_price as i64)
        .bind(item.msrp_price.map(|p| p as i64))
        .bind(item.warehouse_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(())
    }

    async fn update(&self, item: &WarehouseItem) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE warehouse_items SET item_name = $2, sku_code = $3, quantity = $4, \
             cost_price = $5, msrp_price = $6 WHERE id = $1",
        )
        .bind(item.id.as_uuid())
        .bind(&item.item_name)
        .bind(&item.sku_code)
        .bind(item.quantity)
        .bind(item.cost_price as i64)
        .bind(item.msrp_price.map(|p| p as i64))
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(())
    }

    async fn remove(&self, id: WarehouseItemId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM warehouse_items WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn remove_by_warehouse(&self, warehouse_id: WarehouseId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM warehouse_items WHERE warehouse_id = $1")
            .bind(warehouse_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn list(
        &self,
        page: &PageRequest,
        filter: Option<&str>,
    ) -> Result<Page<WarehouseItem>, StoreError> {
        let pattern = like_pattern(filter);
        let order = order_keyword(page.sort_desc);

        let total: i64 = match &pattern {
            Some(p) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM warehouse_items WHERE item_name LIKE $1")
                    .bind(p)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(unavailable)?
            }
            None => sqlx::query_scalar("SELECT COUNT(*) FROM warehouse_items")
                .fetch_one(&self.pool)
                .await
                .map_err(unavailable)?,
        };

        let rows = match &pattern {
            Some(p) => {
                let sql = format!(
                    "SELECT {ITEM_COLUMNS} FROM warehouse_items WHERE item_name LIKE $1 \
                     ORDER BY item_name {order} LIMIT $2 OFFSET $3"
                );
                sqlx::query(&sql)
                    .bind(p)
                    .bind(page.take() as i64)
                    .bind(page.skip() as i64)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(unavailable)?
            }
            None => {
                let sql = format!(
                    "SELECT {ITEM_COLUMNS} FROM warehouse_items \
                     ORDER BY item_name {order} LIMIT $1 OFFSET $2"
                );
                sqlx::query(&sql)
                    .bind(page.take() as i64)
                    .bind(page.skip() as i64)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(unavailable)?
            }
        };

        let items = rows
            .iter()
            .map(item_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            items,
            total_count: total as u64,
        })
    }

    async fn count_for_warehouse(&self, warehouse_id: WarehouseId) -> Result<u64, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM warehouse_items WHERE warehouse_id = $1")
                .bind(warehouse_id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(unavailable)?;
        Ok(count as u64)
    }

    async fn top_by_quantity(
        &self,
        limit: usize,
        desc: bool,
    ) -> Result<Vec<WarehouseItem>, StoreError> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM warehouse_items ORDER BY quantity {} LIMIT $1",
            order_keyword(desc)
        );
        let rows = sqlx::query(&sql)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable)?;
        rows.iter().map(item_from_row).collect()
    }
}
