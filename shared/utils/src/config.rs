use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

use crate::bom::UnclassifiedPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub links: LinkConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Origin record page URLs are built against; empty yields relative URLs
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub unclassified: UnclassifiedPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Start with default values
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with BOMVIEW prefix
            .add_source(Environment::with_prefix("BOMVIEW").separator("__"));

        config.build()?.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                max_request_size: 4 * 1024 * 1024, // 4MB
            },
            links: LinkConfig {
                base_url: String::new(),
            },
            render: RenderConfig {
                unclassified: UnclassifiedPolicy::Drop,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
                file_path: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_file_matches_defaults() {
        let loaded: AppConfig = Config::builder()
            .add_source(File::from_str(
                include_str!("../../../config/default.toml"),
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        let defaults = AppConfig::default();

        assert_eq!(loaded.server.port, defaults.server.port);
        assert_eq!(loaded.server.max_request_size, defaults.server.max_request_size);
        assert_eq!(loaded.render.unclassified, defaults.render.unclassified);
        assert_eq!(loaded.logging.format, defaults.logging.format);
        assert!(loaded.logging.file_path.is_none());
    }

    #[test]
    fn test_reject_policy_from_file() {
        let loaded: AppConfig = Config::builder()
            .add_source(File::from_str(
                include_str!("../../../config/default.toml"),
                FileFormat::Toml,
            ))
            .set_override("render.unclassified", "reject")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(loaded.render.unclassified, UnclassifiedPolicy::Reject);
    }
}
