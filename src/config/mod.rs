use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Testing,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string for the cakes document store. `None` is only accepted
    /// outside production, where it falls back to the in-memory store.
    pub url: Option<String>,
    pub max_connections: u32,
    /// Seconds to wait when acquiring a pooled connection
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    /// `*` allows any origin
    pub cors_origins: Vec<String>,
}

/// Default store location when nothing else is configured
pub const MEMORY_DATABASE_URL: &str = "memory://";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("testing") | Ok("test") => Environment::Testing,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Testing => Self::testing(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v.trim().to_string());
            }
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Ok(v) = env::var("CAKE_API_HOST") {
            self.api.host = v;
        }
        if let Some(port) = env::var("CAKE_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Store connection string, falling back to the in-memory store outside production
    pub fn database_url(&self) -> Option<&str> {
        match (&self.database.url, self.environment) {
            (Some(url), _) => Some(url.as_str()),
            (None, Environment::Production) => None,
            (None, _) => Some(MEMORY_DATABASE_URL),
        }
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    pub fn testing() -> Self {
        Self {
            environment: Environment::Testing,
            database: DatabaseConfig {
                url: None,
                max_connections: 2,
                connection_timeout: 5,
            },
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                max_request_size_bytes: 64 * 1024,
            },
            security: SecurityConfig {
                enable_cors: false,
                cors_origins: Vec::new(),
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 5,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                max_request_size_bytes: 256 * 1024,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: Vec::new(),
            },
        }
    }
}
