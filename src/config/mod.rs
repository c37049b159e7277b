use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Postgres connection string; required unless serving from memory
    pub url: Option<String>,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connection_timeout: u64,
    /// Create missing tables at startup
    pub install_schema: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub questions_per_page: usize,
    pub rows_per_page: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Identity provider domain, e.g. `example.eu.auth0.com`
    pub domain: Option<String>,
    pub audience: Option<String>,
    /// Defaults to `https://<domain>/` when a domain is set
    pub issuer: Option<String>,
    /// HS256 shared secret; takes precedence over the published key set
    pub jwt_secret: Option<String>,
}

impl AuthConfig {
    pub fn effective_issuer(&self) -> Option<String> {
        self.issuer
            .clone()
            .or_else(|| self.domain.as_ref().map(|d| format!("https://{}/", d)))
    }
}

impl AppConfig {
    /// Presets from `APP_ENV`, then the optional YAML file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let environment = Environment::from_name(env::var("APP_ENV").ok().as_deref());
        Self::load_layers(environment, path, |key| env::var(key).ok())
    }

    /// Layer the YAML file at `path` over the preset for `environment`, then
    /// apply `lookup` overrides
    pub fn load_layers<F>(
        environment: Environment,
        path: Option<&Path>,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match path {
            Some(path) => Self::from_yaml_file(environment, path)?,
            None => Self::preset(environment),
        };

        Ok(base.with_overrides(lookup))
    }

    pub fn preset(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
    }

    fn from_yaml_file(environment: Environment, path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(environment, &text).map_err(|source| ConfigError::Yaml {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse `text` as a partial config over the preset for `environment`
    pub fn from_yaml(environment: Environment, text: &str) -> Result<Self, serde_yaml::Error> {
        let mut merged = serde_yaml::to_value(Self::preset(environment))?;
        if !text.trim().is_empty() {
            let overlay: serde_yaml::Value = serde_yaml::from_str(text)?;
            if !overlay.is_null() {
                merge_yaml(&mut merged, overlay);
            }
        }
        serde_yaml::from_value(merged)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Database overrides
        if let Some(v) = lookup("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Some(v) = lookup("DATABASE_INSTALL_SCHEMA") {
            self.database.install_schema = v.parse().unwrap_or(self.database.install_schema);
        }

        // Pagination overrides
        if let Some(v) = lookup("PAGINATION_QUESTIONS_PER_PAGE") {
            self.pagination.questions_per_page =
                v.parse().unwrap_or(self.pagination.questions_per_page);
        }
        if let Some(v) = lookup("PAGINATION_ROWS_PER_PAGE") {
            self.pagination.rows_per_page = v.parse().unwrap_or(self.pagination.rows_per_page);
        }

        // Security overrides
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Some(v) = lookup("AUTH0_DOMAIN") {
            self.security.auth.domain = Some(v);
        }
        if let Some(v) = lookup("API_AUDIENCE") {
            self.security.auth.audience = Some(v);
        }
        if let Some(v) = lookup("AUTH_ISSUER") {
            self.security.auth.issuer = Some(v);
        }
        if let Some(v) = lookup("JWT_SECRET") {
            self.security.auth.jwt_secret = Some(v);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
                install_schema: true,
            },
            pagination: PaginationConfig::default(),
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
                auth: AuthConfig::default(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
                install_schema: true,
            },
            pagination: PaginationConfig::default(),
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
                auth: AuthConfig::default(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
                install_schema: false,
            },
            pagination: PaginationConfig::default(),
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
                auth: AuthConfig::default(),
            },
        }
    }
}

/// Recursively replace keys of `base` with those present in `overlay`
fn merge_yaml(base: &mut serde_yaml::Value, overlay: serde_yaml::Value) {
    match (base, overlay) {
        (serde_yaml::Value::Mapping(base), serde_yaml::Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_yaml(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

impl Environment {
    fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        AppConfig::development().database
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            questions_per_page: 10,
            rows_per_page: 10,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        AppConfig::development().security
    }
}

// Helper macros for common checks
#[macro_export]
macro_rules! is_production {
    ($config:expr) => {
        matches!($config.environment, $crate::config::Environment::Production)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.pagination.questions_per_page, 10);
        assert!(config.database.install_schema);
        assert_eq!(config.security.cors_origins, vec!["*"]);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.database.install_schema);
        assert!(is_production!(config));
        assert!(!config.security.cors_origins.contains(&"*".to_string()));
    }

    #[test]
    fn overrides_replace_presets() {
        let vars: HashMap<&str, &str> = [
            ("PORT", "8080"),
            ("PAGINATION_ROWS_PER_PAGE", "3"),
            ("SECURITY_CORS_ORIGINS", "http://a.test, http://b.test"),
            ("AUTH0_DOMAIN", "casting.eu.auth0.com"),
            ("DATABASE_MAX_CONNECTIONS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::development().with_overrides(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.pagination.rows_per_page, 3);
        assert_eq!(config.security.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(
            config.security.auth.effective_issuer().as_deref(),
            Some("https://casting.eu.auth0.com/")
        );
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let config = AppConfig::from_yaml(
            Environment::Development,
            "pagination:\n  rows_per_page: 5\nsecurity:\n  auth:\n    audience: casting\n",
        )
        .unwrap();
        assert_eq!(config.pagination.rows_per_page, 5);
        assert_eq!(config.pagination.questions_per_page, 10);
        assert_eq!(config.security.auth.audience.as_deref(), Some("casting"));
        assert_eq!(config.server.port, 5000);

        let round_trip =
            AppConfig::from_yaml(Environment::Development, &config.to_yaml().unwrap()).unwrap();
        assert_eq!(round_trip, config);
    }

    #[test]
    fn partial_yaml_keeps_the_production_preset() {
        let path = std::env::temp_dir().join(format!(
            "fullstack-api-partial-{}.yaml",
            std::process::id()
        ));
        std::fs::write(&path, "pagination:\n  rows_per_page: 5\n").unwrap();

        let config = AppConfig::load_layers(Environment::Production, Some(&path), |_| None);
        std::fs::remove_file(&path).unwrap();
        let config = config.unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert!(is_production!(config));
        assert_eq!(config.pagination.rows_per_page, 5);
        assert!(!config.database.install_schema);
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.security.cors_origins, vec!["https://app.example.com"]);
    }

    #[test]
    fn yaml_overrides_nested_keys_only() {
        let config = AppConfig::from_yaml(
            Environment::Staging,
            "database:\n  max_connections: 3\nsecurity:\n  cors_origins: [\"http://a.test\"]\n",
        )
        .unwrap();
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.database.max_connections, 3);
        assert_eq!(config.database.connection_timeout, 10);
        assert_eq!(config.security.cors_origins, vec!["http://a.test"]);
        assert!(config.security.enable_cors);

        let empty = AppConfig::from_yaml(Environment::Production, "").unwrap();
        assert_eq!(empty, AppConfig::preset(Environment::Production));
    }
}
