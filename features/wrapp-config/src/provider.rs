use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

use serde::de::DeserializeOwned;
use wrapp_di::types::TypeInfo;

use crate::errors::ConfigError;

/// A config type that lives under a named section of a config document
///
/// ```ignore
/// #[derive(Deserialize)]
/// struct HttpConfig { port: u16 }
/// impl ConfigSection for HttpConfig {
///     const SECTION: &'static str = "http";
/// }
/// ```
pub trait ConfigSection: DeserializeOwned + Send + Sync + 'static {
    const SECTION: &'static str;
}

/// A provider to register all configs.
///
/// Configs can be registered and retrieved based on type.
#[derive(Default)]
pub struct ConfigProvider {
    configs: HashMap<TypeId, Arc<dyn Any + Send + Sync + 'static>>,
}

impl ConfigProvider {
    /// Initializes an empty Config Provider
    pub fn new() -> Self {
        Self {
            configs: HashMap::new(),
        }
    }

    /// Retrieve a config with specified type.
    ///
    /// Returns `Ok(None)` if the config type is not registered
    pub fn get_config<T: Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>, ConfigError> {
        self.configs
            .get(&TypeId::of::<T>())
            .map(|entry| entry.clone().downcast())
            .transpose()
            .map_err(|_| ConfigError::ConfigMissing(TypeInfo::of::<T>()))
    }

    /// Retrieve a config which must be registered
    pub fn require_config<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ConfigError> {
        self.get_config()?
            .ok_or_else(|| ConfigError::ConfigMissing(TypeInfo::of::<T>()))
    }

    /// Add a config to the registry.
    ///
    /// If the config type is already registered, it will return a
    /// [`ConfigError`] runtime error
    pub fn add_config<T: Send + Sync + 'static>(
        &mut self,
        config: T,
    ) -> Result<&mut Self, ConfigError> {
        let type_id = TypeId::of::<T>();

        if self.configs.contains_key(&type_id) {
            return Err(ConfigError::ConfigAlreadyRegistered(TypeInfo::of::<T>()));
        }

        tracing::debug!("Registered config {}", std::any::type_name::<T>());
        self.configs.insert(type_id, Arc::new(config));
        Ok(self)
    }

    /// Can optionally add a config to the registry.
    ///
    /// If the config provided is `Some(T)`, it will be the same as calling [`ConfigProvider::add_config`]
    /// If the config provided is `None`, then the function just returns `Ok(self)` for chaining
    pub fn maybe_add_config<T: Send + Sync + 'static>(
        &mut self,
        config: Option<T>,
    ) -> Result<&mut Self, ConfigError> {
        match config {
            Some(c) => self.add_config(c),
            None => Ok(self),
        }
    }

    /// Deserializes `T` from its section of a JSON config document and registers it.
    ///
    /// A document without the section leaves the registry untouched.
    pub fn load_section<T: ConfigSection>(
        &mut self,
        document: &serde_json::Value,
    ) -> Result<&mut Self, ConfigError> {
        let Some(section) = document.get(T::SECTION) else {
            tracing::debug!("Config section '{}' not present", T::SECTION);
            return Ok(self);
        };

        let config = T::deserialize(section).map_err(|source| ConfigError::InvalidSection {
            section: T::SECTION,
            source,
        })?;
        self.add_config(config)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct HttpConfig {
        port: u16,
    }
    impl ConfigSection for HttpConfig {
        const SECTION: &'static str = "http";
    }

    #[test]
    fn configs_are_registered_once_per_type() {
        let mut provider = ConfigProvider::new();
        provider.add_config(HttpConfig { port: 1 }).unwrap();

        assert!(matches!(
            provider.add_config(HttpConfig { port: 2 }),
            Err(ConfigError::ConfigAlreadyRegistered(_))
        ));
        assert_eq!(provider.require_config::<HttpConfig>().unwrap().port, 1);
        assert!(provider.get_config::<String>().unwrap().is_none());
    }

    #[test]
    fn sections_are_loaded_from_documents() {
        let document = serde_json::json!({ "http": { "port": 8080 } });
        let mut provider = ConfigProvider::new();
        provider.load_section::<HttpConfig>(&document).unwrap();

        assert_eq!(
            *provider.require_config::<HttpConfig>().unwrap(),
            HttpConfig { port: 8080 }
        );
    }

    #[test]
    fn missing_sections_are_skipped_and_invalid_ones_reported() {
        let mut provider = ConfigProvider::new();
        provider
            .load_section::<HttpConfig>(&serde_json::json!({}))
            .unwrap();
        assert!(provider.get_config::<HttpConfig>().unwrap().is_none());

        let err = provider
            .load_section::<HttpConfig>(&serde_json::json!({ "http": { "port": "nope" } }))
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::InvalidSection { section: "http", .. }));
    }
}
