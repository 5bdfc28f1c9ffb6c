//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;

use super::database::DatabaseConfig;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Dónde se guardan los vehículos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(()),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    /// Sólo presente cuando `storage` es Postgres
    pub database: Option<DatabaseConfig>,
    pub cors_origins: Vec<String>,
    pub log_level: tracing::Level,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Cargar la configuración con una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", &lookup, 8080u16)?;
        let storage = parse_or("STORAGE_BACKEND", &lookup, StorageBackend::Postgres)?;
        let log_level = parse_or("LOG_LEVEL", &lookup, tracing::Level::INFO)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        // Un origen inválido se reporta en vez de descartarse
        if let Some(invalid) = cors_origins
            .iter()
            .find(|origin| HeaderValue::from_str(origin).is_err())
        {
            return Err(ConfigError::Invalid {
                name: "CORS_ORIGINS",
                value: invalid.clone(),
            });
        }

        let database = match storage {
            StorageBackend::Memory => None,
            StorageBackend::Postgres => {
                let url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
                let defaults = DatabaseConfig::with_url(url);
                Some(DatabaseConfig {
                    max_connections: parse_or("DB_MAX_CONNECTIONS", &lookup, defaults.max_connections)?,
                    min_connections: parse_or("DB_MIN_CONNECTIONS", &lookup, defaults.min_connections)?,
                    connect_timeout: parse_or("DB_CONNECT_TIMEOUT_SECS", &lookup, defaults.connect_timeout.as_secs())
                        .map(Duration::from_secs)?,
                    ..defaults
                })
            }
        };

        Ok(Self {
            host,
            port,
            storage,
            database,
            cors_origins,
            log_level,
        })
    }

    /// Obtener la dirección de escucha del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, F>(name: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<EnvironmentConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvironmentConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_memory_backend_defaults() {
        let config = config_from(&[("STORAGE_BACKEND", "memory")]).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.server_url(), "0.0.0.0:8080");
        assert_eq!(config.log_level, tracing::Level::INFO);
        assert!(config.database.is_none());
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = config_from(&[]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_postgres_pool_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/registry"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_CONNECT_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/registry");
        assert_eq!(database.max_connections, 4);
        assert_eq!(database.min_connections, 1);
        assert_eq!(database.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_port_is_reported() {
        let err = config_from(&[("STORAGE_BACKEND", "memory"), ("PORT", "http")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "http".to_string()
            }
        );
    }

    #[test]
    fn test_cors_origins_are_split_and_trimmed() {
        let config = config_from(&[
            ("STORAGE_BACKEND", "memory"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("LOG_LEVEL", "debug"),
        ])
        .unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.log_level, tracing::Level::DEBUG);
    }

    #[test]
    fn test_invalid_cors_origin_is_reported() {
        let err = config_from(&[
            ("STORAGE_BACKEND", "memory"),
            ("CORS_ORIGINS", "http://a.test,http://bad\u{7f}.test"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "CORS_ORIGINS",
                value: "http://bad\u{7f}.test".to_string()
            }
        );
    }
}
