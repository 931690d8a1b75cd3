use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Longest session a token may grant: one year
pub const MAX_JWT_EXPIRY_HOURS: u64 = 24 * 366;

/// Errors raised while assembling configuration at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://...` for the SQL store, `memory://` for the in-process store
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub cors_origins: Vec<String>,
    pub password_hash_memory_kib: u32,
    pub password_hash_iterations: u32,
}

/// Campus-specific field rules shared by every validator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Domain part of institutional emails, without the `@`
    pub email_domain: String,
    /// Short campus name used in messages ("Please use your NITJ email address")
    pub campus_name: String,
    pub product_description_max: usize,
    /// Upper bound on the decoded size of an embedded image
    pub max_image_bytes: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            email_domain: "nitj.ac.in".to_string(),
            campus_name: "NITJ".to_string(),
            product_description_max: 500,
            max_image_bytes: 5 * 1024 * 1024,
        }
    }
}

impl ValidationConfig {
    /// `@nitj.ac.in`, lowercased
    pub fn email_suffix(&self) -> String {
        format!("@{}", self.email_domain.trim_start_matches('@').to_lowercase())
    }

    pub fn email_message(&self) -> String {
        format!("Please use your {} email address", self.campus_name)
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Self::for_environment(environment, jwt_secret, database_url).with_overrides(&lookup)
    }

    /// Preset defaults for an environment
    pub fn for_environment(environment: Environment, jwt_secret: String, database_url: String) -> Self {
        match environment {
            Environment::Production => Self::production(jwt_secret, database_url),
            Environment::Staging => Self::staging(jwt_secret, database_url),
            Environment::Development => Self::development(jwt_secret, database_url),
        }
    }

    fn with_overrides<F>(mut self, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server
        if let Some(v) = lookup("CAMPUS_KART_PORT").or_else(|| lookup("PORT")) {
            self.server.port = parse_var("PORT", &v)?;
        }
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }

        // Database
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse_var("DATABASE_CONNECTION_TIMEOUT", &v)?;
        }

        // API
        if let Some(v) = lookup("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = parse_var("API_ENABLE_REQUEST_LOGGING", &v)?;
        }
        if let Some(v) = lookup("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = parse_var("API_MAX_REQUEST_SIZE_BYTES", &v)?;
        }

        // Security
        if let Some(v) = lookup("SECURITY_JWT_EXPIRY_HOURS") {
            let hours: u64 = parse_var("SECURITY_JWT_EXPIRY_HOURS", &v)?;
            if hours == 0 || hours > MAX_JWT_EXPIRY_HOURS {
                return Err(ConfigError::Invalid {
                    name: "SECURITY_JWT_EXPIRY_HOURS",
                    value: v,
                });
            }
            self.security.jwt_expiry_hours = hours;
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(v) = lookup("PASSWORD_HASH_MEMORY_KIB") {
            self.security.password_hash_memory_kib = parse_var("PASSWORD_HASH_MEMORY_KIB", &v)?;
        }
        if let Some(v) = lookup("PASSWORD_HASH_ITERATIONS") {
            self.security.password_hash_iterations = parse_var("PASSWORD_HASH_ITERATIONS", &v)?;
        }

        // Campus rules
        if let Some(v) = lookup("CAMPUS_EMAIL_DOMAIN") {
            self.validation.email_domain = v.trim().trim_start_matches('@').to_lowercase();
        }
        if let Some(v) = lookup("CAMPUS_NAME") {
            self.validation.campus_name = v;
        }
        if let Some(v) = lookup("PRODUCT_DESCRIPTION_MAX") {
            self.validation.product_description_max = parse_var("PRODUCT_DESCRIPTION_MAX", &v)?;
        }
        if let Some(v) = lookup("MAX_IMAGE_BYTES") {
            self.validation.max_image_bytes = parse_var("MAX_IMAGE_BYTES", &v)?;
        }

        Ok(self)
    }

    fn development(jwt_secret: String, database_url: String) -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 50 * 1024 * 1024, // 50MB, images travel inline
            },
            security: SecurityConfig {
                jwt_secret,
                jwt_expiry_hours: 24 * 7,
                cors_origins: vec!["*".to_string()],
                password_hash_memory_kib: 19 * 1024,
                password_hash_iterations: 2,
            },
            validation: ValidationConfig::default(),
        }
    }

    fn staging(jwt_secret: String, database_url: String) -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 50 * 1024 * 1024,
            },
            security: SecurityConfig {
                jwt_secret,
                jwt_expiry_hours: 24,
                cors_origins: vec!["https://staging.campuskart.app".to_string()],
                password_hash_memory_kib: 19 * 1024,
                password_hash_iterations: 2,
            },
            validation: ValidationConfig::default(),
        }
    }

    fn production(jwt_secret: String, database_url: String) -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 50 * 1024 * 1024,
            },
            security: SecurityConfig {
                jwt_secret,
                jwt_expiry_hours: 24,
                cors_origins: vec!["https://campuskart.app".to_string()],
                password_hash_memory_kib: 19 * 1024,
                password_hash_iterations: 2,
            },
            validation: ValidationConfig::default(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}
