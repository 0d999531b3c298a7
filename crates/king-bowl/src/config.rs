//! Application configuration.
//!
//! Layers, later overriding earlier:
//! 1. Built-in defaults
//! 2. `kcb.yaml` in the working directory, if present
//! 3. The file passed to [`AppConfig::load`], if any
//! 4. The file named by `KCB_CONFIG`, if set
//! 5. `KCB__SECTION__KEY` environment variables, e.g. `KCB__RESTAURANT__TABLE_COUNT=24`

use crate::pricing::Pricing;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "kcb.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "KCB_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "KCB";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub restaurant: RestaurantConfig,
    pub pricing: Pricing,
    pub storage: StorageConfig,
    pub simulation: SimulationConfig,
    pub actors: ActorConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RestaurantConfig {
    pub name: String,
    /// Dine-in tables are numbered `1..=table_count`.
    pub table_count: u8,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            name: "King Chinese Bowl".to_string(),
            table_count: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory for the file backend.
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            dir: PathBuf::from("data"),
        }
    }
}

/// Artificial delays standing in for the payment and booking backends.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub checkout_latency_ms: u64,
    pub reservation_latency_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            checkout_latency_ms: 1500,
            reservation_latency_ms: 1000,
        }
    }
}

impl SimulationConfig {
    pub fn checkout_latency(&self) -> Duration {
        Duration::from_millis(self.checkout_latency_ms)
    }

    pub fn reservation_latency(&self) -> Duration {
        Duration::from_millis(self.reservation_latency_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    pub mailbox_size: usize,
    /// Number given to the first order on a fresh ledger.
    pub first_order_number: u32,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            mailbox_size: 32,
            first_order_number: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from files and the environment.
    pub fn load(path: Option<&str>) -> Result<Self, ::config::ConfigError> {
        use ::config::{Config, Environment, File, FileFormat};

        let mut builder = Config::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// In-memory storage and no simulated latency.
    pub fn for_test() -> Self {
        Self {
            simulation: SimulationConfig {
                checkout_latency_ms: 0,
                reservation_latency_ms: 0,
            },
            ..Self::default()
        }
    }
}
