use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::catalog::DEFAULT_BASE_URL;

/// Server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Port the HTTP server binds on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path of the SQLite file holding the favorites table
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Base URL of the upstream recipe catalog
    #[serde(default = "default_catalog_base_url")]
    pub catalog_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: default_port(),
            database_path: default_database_path(),
            catalog_base_url: default_catalog_base_url(),
        }
    }
}

// Default value functions
fn default_port() -> u16 {
    5000
}

fn default_database_path() -> String {
    "data/recipes.db".to_string()
}

fn default_catalog_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ServerConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_SHELF__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_SHELF__DATABASE_PATH
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_SHELF")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
