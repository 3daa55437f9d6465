//! Service wiring: stores, directories, and the session issuer.

use std::sync::Arc;

use stockroom_auth::{AccountDirectory, AccountStore, AuthConfig, SessionIssuer, TokenSigner};
use stockroom_infra::{
    ensure_schema, seed_admin, InMemoryAccountStore, InMemoryWarehouseItemStore,
    InMemoryWarehouseStore, PostgresAccountStore, PostgresWarehouseItemStore,
    PostgresWarehouseStore, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD,
};
use stockroom_inventory::{
    CatalogDirectory, WarehouseDirectory, WarehouseItemStore, WarehouseStore,
};

/// Runtime configuration gathered once at startup.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub auth: AuthConfig,
    pub admin_email: String,
    pub admin_password: String,
    pub log_path: String,
}

impl RuntimeConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            auth: AuthConfig::from_env()?,
            admin_email: std::env::var("STOCKROOM_ADMIN_EMAIL")
                .unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string()),
            admin_password: std::env::var("STOCKROOM_ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
            log_path: std::env::var("STOCKROOM_LOG_PATH")
                .unwrap_or_else(|_| "logs/app_log.txt".to_string()),
        })
    }

    /// Test fixture with in-memory-friendly defaults.
    pub fn for_tests(auth: AuthConfig) -> Self {
        Self {
            auth,
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            log_path: "logs/app_log.txt".to_string(),
        }
    }
}

/// Directories + session issuer shared by all handlers.
pub struct AppServices {
    pub signer: Arc<TokenSigner>,
    pub sessions: SessionIssuer,
    pub users: AccountDirectory,
    pub warehouses: WarehouseDirectory,
    pub items: CatalogDirectory,
    pub log_path: String,
}

impl AppServices {
    fn wire(
        config: &RuntimeConfig,
        accounts: Arc<dyn AccountStore>,
        warehouses: Arc<dyn WarehouseStore>,
        items: Arc<dyn WarehouseItemStore>,
    ) -> Self {
        let signer = Arc::new(TokenSigner::new(&config.auth));
        Self {
            signer: signer.clone(),
            sessions: SessionIssuer::new(accounts.clone(), signer),
            users: AccountDirectory::new(accounts),
            warehouses: WarehouseDirectory::new(warehouses.clone(), items.clone()),
            items: CatalogDirectory::new(items, warehouses),
            log_path: config.log_path.clone(),
        }
    }
}

/// In-memory wiring with seeded defaults (tests/dev).
pub async fn build_in_memory(config: &RuntimeConfig) -> anyhow::Result<AppServices> {
    let accounts: Arc<dyn AccountStore> = Arc::new(InMemoryAccountStore::new());
    let warehouses: Arc<dyn WarehouseStore> = Arc::new(InMemoryWarehouseStore::new());
    let items: Arc<dyn WarehouseItemStore> = Arc::new(InMemoryWarehouseItemStore::new());

    seed_admin(accounts.as_ref(), &config.admin_email, &config.admin_password).await?;

    Ok(AppServices::wire(config, accounts, warehouses, items))
}

/// Postgres wiring; bootstraps the schema and seeds defaults.
pub async fn build_postgres(config: &RuntimeConfig, database_url: &str) -> anyhow::Result<AppServices> {
    let pool = sqlx::PgPool::connect(database_url).await?;
    ensure_schema(&pool).await?;

    let accounts: Arc<dyn AccountStore> = Arc::new(PostgresAccountStore::new(pool.clone()));
    let warehouses: Arc<dyn WarehouseStore> = Arc::new(PostgresWarehouseStore::new(pool.clone()));
    let items: Arc<dyn WarehouseItemStore> = Arc::new(PostgresWarehouseItemStore::new(pool));

    seed_admin(accounts.as_ref(), &config.admin_email, &config.admin_password).await?;

    Ok(AppServices::wire(config, accounts, warehouses, items))
}
