//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    load_config, load_config_or_default, Config, ConfigError, API_KEY_ENV, DEFAULT_EXPORT_PATH,
    DEFAULT_PAGE_LIMIT,
};
