use wrapp_di::types::TypeInfo;

/// Errors when registering or retrieving configs
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The required Config is not known
    #[error("The config type '{0}' is not registered")]
    ConfigMissing(TypeInfo),
    /// The Config is already registered
    #[error("The config type '{0}' is already registered")]
    ConfigAlreadyRegistered(TypeInfo),
    /// A config section could not be deserialized
    #[error("Config section '{section}' is invalid: {source}")]
    InvalidSection {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
