/// Application context and dependency injection
use crate::{
    config::{ServerConfig, StorageBackend},
    db,
    error::ApiResult,
    models::NewAdmin,
    store::{memory::MemStorage, seed, sqlite::SqliteStorage, Storage},
};
use std::sync::Arc;
use tracing::info;

/// Application context holding shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub storage: Arc<dyn Storage>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub async fn new(config: ServerConfig) -> ApiResult<Self> {
        config.validate()?;

        let storage: Arc<dyn Storage> = match config.storage.backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage backend");
                Arc::new(MemStorage::new())
            }
            StorageBackend::Sqlite => {
                info!("Using SQLite storage backend at {:?}", config.storage.database);
                let pool =
                    db::create_pool(&config.storage.database, db::DatabaseOptions::default())
                        .await?;
                db::run_migrations(&pool).await?;
                db::test_connection(&pool).await?;
                Arc::new(SqliteStorage::new(pool))
            }
        };

        let ctx = Self {
            config: Arc::new(config),
            storage,
        };
        ctx.initialize_data().await?;

        Ok(ctx)
    }

    /// Seed an empty store and ensure the bootstrap admin exists
    async fn initialize_data(&self) -> ApiResult<()> {
        let empty = self.storage.list_admins().await?.is_empty()
            && self.storage.list_owners().await?.is_empty();

        if empty && self.config.storage.seed_on_empty {
            seed::populate(self.storage.as_ref()).await?;
        }

        if let Some(bootstrap) = &self.config.auth.bootstrap_admin {
            if self
                .storage
                .get_admin_by_username(&bootstrap.username)
                .await?
                .is_none()
            {
                info!("Creating bootstrap admin {}", bootstrap.username);
                self.storage
                    .create_admin(NewAdmin {
                        username: bootstrap.username.clone(),
                        password: bootstrap.password.clone(),
                        name: bootstrap.name.clone(),
                        email: bootstrap.email.clone(),
                        role: Some(crate::models::AdminRole::SuperAdmin),
                    })
                    .await?;
            }
        }

        Ok(())
    }

    /// Get service URL
    pub fn service_url(&self) -> String {
        format!(
            "http://{}:{}",
            self.config.service.hostname, self.config.service.port
        )
    }
}
