/// Configuration management for the PetHaven service
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_directory: PathBuf,
    pub database: PathBuf,
    /// Load the sample data set when the chosen backend starts empty
    pub seed_on_empty: bool,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Lifetime of issued admin/owner tokens, in minutes
    pub token_ttl_minutes: i64,
    /// Admin account created on first run if no admins exist
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Bootstrap admin credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> ApiResult<Self> {
        dotenv::dotenv().ok();

        let hostname = env::var("PETHAVEN_HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("PETHAVEN_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ApiError::Validation("Invalid port number".to_string()))?;

        let backend = match env::var("PETHAVEN_STORAGE_BACKEND")
            .unwrap_or_else(|_| "sqlite".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StorageBackend::Memory,
            "sqlite" => StorageBackend::Sqlite,
            other => {
                return Err(ApiError::Validation(format!(
                    "Unknown storage backend: {}",
                    other
                )))
            }
        };

        let data_directory: PathBuf = env::var("PETHAVEN_DATA_DIRECTORY")
            .unwrap_or_else(|_| "./data".to_string())
            .into();
        let database = env::var("PETHAVEN_DB_LOCATION")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_directory.join("pethaven.sqlite"));
        let seed_on_empty = env::var("PETHAVEN_SEED_ON_EMPTY")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let jwt_secret = env::var("PETHAVEN_JWT_SECRET")
            .map_err(|_| ApiError::Validation("JWT secret required".to_string()))?;
        let token_ttl_minutes = env::var("PETHAVEN_TOKEN_TTL_MINUTES")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .unwrap_or(60);

        let bootstrap_admin = if let Ok(username) = env::var("PETHAVEN_ADMIN_USERNAME") {
            Some(BootstrapAdmin {
                username,
                password: env::var("PETHAVEN_ADMIN_PASSWORD")
                    .map_err(|_| ApiError::Validation("Bootstrap admin password required".to_string()))?,
                name: env::var("PETHAVEN_ADMIN_NAME").unwrap_or_else(|_| "Admin User".to_string()),
                email: env::var("PETHAVEN_ADMIN_EMAIL")
                    .unwrap_or_else(|_| format!("admin@{}", hostname)),
            })
        } else {
            None
        };

        let level = env::var("PETHAVEN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            service: ServiceConfig { hostname, port },
            storage: StorageConfig {
                backend,
                data_directory,
                database,
                seed_on_empty,
            },
            auth: AuthConfig {
                jwt_secret,
                token_ttl_minutes,
                bootstrap_admin,
            },
            logging: LoggingConfig { level },
        })
    }

    /// Sanity-check configuration values
    pub fn validate(&self) -> ApiResult<()> {
        if self.auth.jwt_secret.len() < 16 {
            return Err(ApiError::Validation(
                "JWT secret must be at least 16 characters".to_string(),
            ));
        }
        if self.auth.token_ttl_minutes <= 0 {
            return Err(ApiError::Validation(
                "Token TTL must be positive".to_string(),
            ));
        }
        if let Some(admin) = &self.auth.bootstrap_admin {
            if admin.password.len() < 8 {
                return Err(ApiError::Validation(
                    "Bootstrap admin password must be at least 8 characters".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ServerConfig {
        ServerConfig {
            service: ServiceConfig {
                hostname: "localhost".to_string(),
                port: 8080,
            },
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                data_directory: "./data".into(),
                database: "./data/pethaven.sqlite".into(),
                seed_on_empty: false,
            },
            auth: AuthConfig {
                jwt_secret: "a-secret-long-enough-for-tests".to_string(),
                token_ttl_minutes: 60,
                bootstrap_admin: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    #[test]
    fn test_validate_accepts_sane_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let mut config = test_config();
        config.auth.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_weak_bootstrap_password() {
        let mut config = test_config();
        config.auth.bootstrap_admin = Some(BootstrapAdmin {
            username: "admin".to_string(),
            password: "pw".to_string(),
            name: "Admin User".to_string(),
            email: "admin@localhost".to_string(),
        });
        assert!(config.validate().is_err());
    }
}
