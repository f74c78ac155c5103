//! # Configuration
//!
//! Configuration is managed by [`confique`], layered in priority order:
//! 1. **Environment variables**: `BLOGADMIN_RETENTION_DAYS`, `BLOGADMIN_PAGE_SIZE`, ...
//! 2. **Config file**: `blogadmin.toml` in the data directory.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `retention_days` | `7` | Days a soft-deleted post is kept before purge |
//! | `page_size` | `5` | Posts per page when listing |
//! | `storage_key` | `blogs` | Key holding the collection in the backend |
//! | `max_image_bytes` | `1048576` | Largest accepted image upload |

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::retention::{RetentionPolicy, DEFAULT_RETENTION_DAYS};
use crate::store::DEFAULT_STORAGE_KEY;

pub const CONFIG_FILENAME: &str = "blogadmin.toml";
pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 1024 * 1024;

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BlogConfig {
    /// Days a soft-deleted post stays in storage before it is purged.
    #[config(env = "BLOGADMIN_RETENTION_DAYS", default = 7)]
    pub retention_days: u32,

    /// Posts per page when listing.
    #[config(env = "BLOGADMIN_PAGE_SIZE", default = 5)]
    pub page_size: usize,

    /// Backend key the record collection is stored under.
    #[config(env = "BLOGADMIN_STORAGE_KEY", default = "blogs")]
    pub storage_key: String,

    /// Largest image (in bytes) the client accepts before encoding it inline.
    #[config(env = "BLOGADMIN_MAX_IMAGE_BYTES", default = 1048576)]
    pub max_image_bytes: u64,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_RETENTION_DAYS,
            page_size: DEFAULT_PAGE_SIZE,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

impl BlogConfig {
    /// Loads env overrides, then `blogadmin.toml` in `data_dir` if present,
    /// then defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config = BlogConfig::builder()
            .env()
            .file(data_dir.join(CONFIG_FILENAME))
            .load()?;
        Ok(config)
    }

    pub fn retention(&self) -> RetentionPolicy {
        RetentionPolicy::days(self.retention_days)
    }

    /// Page size, never zero.
    pub fn page_size(&self) -> usize {
        self.page_size.max(1)
    }
}
