use wrapp_di::types::DynError;

use crate::{credential::CredentialError, sdk::SdkError};

/// Errors raised while registering the admin module or bootstrapping its providers
#[derive(thiserror::Error, Debug)]
pub enum AdminModuleError {
    /// The registration request does not describe exactly one way to obtain the options
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    /// Producing the options failed, the source error is kept as it is
    #[error(transparent)]
    Resolution(DynError),
    /// The SDK refused to initialize the app
    #[error(transparent)]
    Initialization(#[from] SdkError),
}

/// Errors raised by the services wrapping the SDK clients
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidArgument(&'static str),
    #[error(transparent)]
    Sdk(#[from] SdkError),
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error("Value does not map to the requested type: {0}")]
    Json(#[from] serde_json::Error),
}
