use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use common::config::StorageAppConfig;

/// Carousel configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct CarouselConfig {
    /// Number of slides taken from the newest items. Default: 5.
    #[serde(default = "default_carousel_size")]
    pub size: usize,
    /// Auto-advance period in milliseconds. Default: 5000.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_carousel_size() -> usize {
    5
}
fn default_interval_ms() -> u64 {
    5_000
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            size: default_carousel_size(),
            interval_ms: default_interval_ms(),
        }
    }
}

/// Recent-activity list configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct RecentConfig {
    /// Maximum entries shown. Default: 10.
    #[serde(default = "default_recent_limit")]
    pub limit: usize,
}

fn default_recent_limit() -> usize {
    10
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self {
            limit: default_recent_limit(),
        }
    }
}

/// Portal application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PortalAppConfig {
    #[serde(default)]
    pub storage: StorageAppConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub recent: RecentConfig,
}

impl PortalAppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("MEMI_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("storage.backend", "file")?
            .set_default("storage.data_dir", "./data")?
            .set_default("storage.publications_table", "publicaciones")?
            .set_default("storage.courses_table", "cursos")?
            .set_default("storage.announcements_table", "icpc")?
            .set_default("carousel.size", 5_i64)?
            .set_default("carousel.interval_ms", 5_000_i64)?
            .set_default("recent.limit", 10_i64)?
            .add_source(File::with_name(&config_path).required(false))
            .add_source(Environment::with_prefix("MEMI").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that deserialize but cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.interval_ms == 0 {
            return Err(ConfigError::Message(
                "carousel.interval_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
