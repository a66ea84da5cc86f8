use std::{any::Any, fmt::Debug, future::Future, sync::Arc};

use serde::{Deserialize, Serialize};
use wrapp_di::types::{DynError, Injectable};

/// Raw service account key material
///
/// Deserializes both from the camelCase shape (`projectId`) and from the
/// snake_case service account key file Google hands out (`project_id`).
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccount {
    #[serde(default, alias = "project_id")]
    pub project_id: String,
    #[serde(default, alias = "client_email")]
    pub client_email: String,
    #[serde(default, alias = "private_key")]
    pub private_key: String,
}
impl Debug for ServiceAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
impl ServiceAccount {
    pub fn new(
        project_id: impl Into<String>,
        client_email: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        ServiceAccount {
            project_id: project_id.into(),
            client_email: client_email.into(),
            private_key: private_key.into(),
        }
    }
}

/// Opaque HTTP agent handed through to the SDK untouched
///
/// Two agents are equal when they are the same object.
#[derive(Clone)]
pub struct HttpAgent(Arc<dyn Any + Send + Sync>);
impl HttpAgent {
    pub fn new<A: Any + Send + Sync>(agent: A) -> Self {
        HttpAgent(Arc::new(agent))
    }

    pub fn downcast_ref<A: Any>(&self) -> Option<&A> {
        self.0.downcast_ref()
    }
}
impl PartialEq for HttpAgent {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
impl Debug for HttpAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HttpAgent")
    }
}

/// Options the Firebase Admin module is configured with
///
/// Produced once per registration and never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOptions {
    pub credential: ServiceAccount,
    #[serde(default, rename = "databaseURL", alias = "databaseUrl")]
    pub database_url: Option<String>,
    /// `Some(Value::Null)` makes database requests unauthenticated
    #[serde(default)]
    pub database_auth_variable_override: Option<serde_json::Value>,
    #[serde(default)]
    pub service_account_id: Option<String>,
    #[serde(default)]
    pub storage_bucket: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(skip)]
    pub http_agent: Option<HttpAgent>,
    /// Name the app is registered under, defaults to the registration id
    #[serde(default)]
    pub app_name: Option<String>,
}
impl AdminOptions {
    pub fn new(credential: ServiceAccount) -> Self {
        AdminOptions {
            credential,
            ..Default::default()
        }
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn storage_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.storage_bucket = Some(bucket.into());
        self
    }

    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn service_account_id(mut self, id: impl Into<String>) -> Self {
        self.service_account_id = Some(id.into());
        self
    }

    pub fn auth_override(mut self, auth: serde_json::Value) -> Self {
        self.database_auth_variable_override = Some(auth);
        self
    }

    pub fn http_agent(mut self, agent: HttpAgent) -> Self {
        self.http_agent = Some(agent);
        self
    }

    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }
}

/// A provider which knows how to create the [AdminOptions]
///
/// Registered in the container and used by the existing-provider and class strategies.
pub trait AdminOptionsFactory: Injectable {
    fn create_admin_options(&self) -> impl Future<Output = Result<AdminOptions, DynError>> + Send;
}
