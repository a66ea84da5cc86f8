//! Wrapp Config provides a registry of configs that can be injected in the rest of the
//! modules.
//!
//! Wrapp Config is split into two major parts:
//! 1. ConfigProvider: Used to create the registry of all configs, either from values or
//!    from named sections of a JSON document
//! 2. Config<T>: A wrapper type to be able to resolve and retrieve configs
//!
//! The ConfigProvider is registered in the container like any other instance:
//!
//! ```ignore
//! let document: serde_json::Value = serde_json::from_str(&std::fs::read_to_string("app.json")?)?;
//! let mut configs = ConfigProvider::new();
//! configs.load_section::<HttpConfig>(&document)?;
//!
//! let container = DiBuilder::new().add_instance(configs).build().await?;
//! ```

pub mod config;
pub mod errors;
pub mod provider;

pub use config::Config;
pub use errors::ConfigError;
pub use provider::{ConfigProvider, ConfigSection};
