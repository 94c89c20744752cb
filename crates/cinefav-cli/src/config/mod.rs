//! Application configuration module.
//!
//! Manages the TOML config file holding the provider API key, an optional
//! provider base URL and the UI locale.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{API_KEY_ENV, AppConfig, ProviderConfig};
pub use paths::{resolve_config_path, resolve_log_path};
