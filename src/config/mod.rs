use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub table: TableConfig,
    pub action: ActionConfig,
    pub session: SessionConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub default_page_size: u32,
    pub export_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionConfig {
    pub disclosure_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub dir: Option<PathBuf>,
    pub token_mirror_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
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
        // API overrides
        if let Ok(v) = env::var("ADMIN_API_BASE_URL") {
            self.api.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("ADMIN_API_TIMEOUT_SECS") {
            self.api.timeout_secs = v.parse().unwrap_or(self.api.timeout_secs);
        }
        if let Ok(v) = env::var("ADMIN_API_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Table overrides
        if let Ok(v) = env::var("ADMIN_DEFAULT_PAGE_SIZE") {
            self.table.default_page_size = v.parse().unwrap_or(self.table.default_page_size);
        }
        if let Ok(v) = env::var("ADMIN_EXPORT_DIR") {
            self.table.export_dir = Some(PathBuf::from(v));
        }

        // Action overrides
        if let Ok(v) = env::var("ADMIN_DISCLOSURE_DELAY_MS") {
            self.action.disclosure_delay_ms = v.parse().unwrap_or(self.action.disclosure_delay_ms);
        }

        // Session overrides
        if let Ok(v) = env::var("ADMIN_SESSION_DIR") {
            self.session.dir = Some(PathBuf::from(v));
        }

        if let Ok(v) = env::var("ADMIN_LOG_LEVEL") {
            self.log.level = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:8000".to_string(),
                timeout_secs: 10,
                enable_request_logging: true,
            },
            table: TableConfig {
                default_page_size: 10,
                export_dir: None,
            },
            action: ActionConfig {
                disclosure_delay_ms: 300,
            },
            session: SessionConfig {
                dir: None,
                token_mirror_days: 7,
            },
            log: LogConfig {
                level: "debug".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging-api.example.com".to_string(),
                timeout_secs: 10,
                enable_request_logging: true,
            },
            table: TableConfig {
                default_page_size: 10,
                export_dir: None,
            },
            action: ActionConfig {
                disclosure_delay_ms: 300,
            },
            session: SessionConfig {
                dir: None,
                token_mirror_days: 7,
            },
            log: LogConfig {
                level: "info".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://api.example.com".to_string(),
                timeout_secs: 10,
                enable_request_logging: false,
            },
            table: TableConfig {
                default_page_size: 20,
                export_dir: None,
            },
            action: ActionConfig {
                disclosure_delay_ms: 300,
            },
            session: SessionConfig {
                dir: None,
                token_mirror_days: 7,
            },
            log: LogConfig {
                level: "warn".to_string(),
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

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}
