//! Contract of the Firebase Admin SDK this crate wires into the container.
//!
//! The SDK itself (networking, token signing, persistence) lives behind these traits.
//! Everything here is consumed, never implemented, by the module.

use std::sync::Arc;

use async_trait::async_trait;

use crate::credential::{Credential, CredentialError};
use crate::options::{HttpAgent, ServiceAccount};

pub mod auth;
pub mod database;
pub mod firestore;
pub mod messaging;

pub use auth::{DecodedIdToken, ListUsersResult, UserManagement, UserProperties, UserRecord};
pub use database::KeyValueStore;
pub use firestore::{DocumentStore, FilterOp, QueryConstraint, SetOptions};
pub use messaging::{
    BatchResponse, Message, MessagePayload, MessageTarget, MulticastMessage, Notification,
    PushMessaging, SendResponse, TopicManagementError, TopicManagementResponse,
};

/// Errors raised by the SDK
#[derive(thiserror::Error, Debug)]
pub enum SdkError {
    #[error("Invalid credential: {0}")]
    InvalidCredential(#[from] CredentialError),
    #[error("Firebase app named '{0}' already exists")]
    DuplicateApp(String),
    #[error("Firebase app named '{0}' does not exist")]
    NoApp(String),
    /// Error reported by a Firebase service, e.g. `auth/user-not-found`
    #[error("{code}: {message}")]
    Service { code: String, message: String },
}
impl SdkError {
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        SdkError::Service {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Options exactly as the SDK's `initialize_app` receives them
#[derive(Debug, Clone, PartialEq)]
pub struct AppOptions {
    pub credential: Credential,
    pub database_url: Option<String>,
    pub database_auth_variable_override: Option<serde_json::Value>,
    pub service_account_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub project_id: Option<String>,
    pub http_agent: Option<HttpAgent>,
}

/// Entry point of the SDK
pub trait AdminSdk: Send + Sync + 'static {
    /// Converts key material into the SDK's credential representation
    fn cert(&self, account: &ServiceAccount) -> Result<Credential, SdkError> {
        Ok(Credential::cert(account)?)
    }

    /// Initializes a new app, the SDK does not contact any service here
    ///
    /// Called without holding any lock of the [AppRegistry](crate::AppRegistry), the name
    /// stays reserved until this returns.
    fn initialize_app(&self, name: &str, options: &AppOptions) -> Result<Arc<dyn SdkApp>, SdkError>;
}

/// An initialized SDK app and its per capability clients
#[async_trait]
pub trait SdkApp: Send + Sync {
    fn auth(&self) -> Arc<dyn UserManagement>;
    fn database(&self) -> Arc<dyn KeyValueStore>;
    fn firestore(&self) -> Arc<dyn DocumentStore>;
    fn messaging(&self) -> Arc<dyn PushMessaging>;

    /// Releases the app's resources, the app must not be used afterwards
    async fn delete(&self) -> Result<(), SdkError>;
}
