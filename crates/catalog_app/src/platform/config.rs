//! Application configuration, read from a RON file.
//!
//! A missing file means defaults. A file that cannot be read or parsed is
//! reported in the log and also falls back to defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use catalog_core::{ControllerConfig, Locale, Messages};
use catalog_engine::ClientSettings;
use catalog_logging::{catalog_info, catalog_warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    #[default]
    PublicCatalog,
    StaffListing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub page: PageKind,
    pub locale: Locale,
    pub debounce_ms: u64,
    /// Overrides the page's own minimum query length.
    pub min_query_chars: Option<usize>,
    pub detail_path: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        let controller = ControllerConfig::default();
        Self {
            base_url: client.base_url,
            page: PageKind::default(),
            locale: Locale::default(),
            debounce_ms: controller.debounce.as_millis() as u64,
            min_query_chars: None,
            detail_path: controller.detail_path,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            max_bytes: client.max_bytes,
        }
    }
}

impl AppConfig {
    pub fn controller_config(&self) -> ControllerConfig {
        let mut config = match self.page {
            PageKind::PublicCatalog => ControllerConfig::public_catalog(),
            PageKind::StaffListing => ControllerConfig::staff_listing(),
        };
        if let Some(min_chars) = self.min_query_chars {
            config.min_query_chars = min_chars;
        }
        config.debounce = Duration::from_millis(self.debounce_ms);
        config.detail_path = self.detail_path.clone();
        config.messages = self.messages();
        config
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            ..ClientSettings::default()
        }
    }

    pub fn messages(&self) -> Messages {
        Messages::for_locale(self.locale)
    }

    /// How long a one-shot command waits for the backend before giving up.
    pub fn reply_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs + self.connect_timeout_secs + 1)
    }
}

pub fn load_config(path: &Path) -> AppConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::default();
        }
        Err(err) => {
            catalog_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            catalog_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            catalog_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}
