use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Directory served for non-API requests (the browser front-end).
    pub static_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON data file holding the student records.
    pub data_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub session_expiry_hours: u64,
    pub session_sweep_interval_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("STUDENT_API_STATIC_DIR") {
            self.server.static_dir = v;
        }

        // Store overrides
        if let Ok(v) = env::var("STUDENT_API_DATA_FILE") {
            self.store.data_file = v;
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_SESSION_EXPIRY_HOURS") {
            self.security.session_expiry_hours =
                v.parse().unwrap_or(self.security.session_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_SESSION_SWEEP_INTERVAL_SECS") {
            self.security.session_sweep_interval_secs =
                v.parse().unwrap_or(self.security.session_sweep_interval_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                static_dir: "public".to_string(),
            },
            store: StoreConfig {
                data_file: "students.json".to_string(),
            },
            security: SecurityConfig {
                session_expiry_hours: 24 * 7, // 1 week
                session_sweep_interval_secs: 300,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                static_dir: "public".to_string(),
            },
            store: StoreConfig {
                data_file: "students.json".to_string(),
            },
            security: SecurityConfig {
                session_expiry_hours: 24,
                session_sweep_interval_secs: 60,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                static_dir: "public".to_string(),
            },
            store: StoreConfig {
                data_file: "students.json".to_string(),
            },
            security: SecurityConfig {
                session_expiry_hours: 4,
                session_sweep_interval_secs: 60,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
