use std::sync::Arc;

use crate::{
    app::{AppRegistry, FirebaseApp},
    errors::AdminModuleError,
    options::AdminOptions,
    sdk::{AdminSdk, AppOptions},
};

/// Turns resolved [AdminOptions] into an initialized [FirebaseApp]
#[derive(Clone)]
pub struct ClientFactory {
    sdk: Arc<dyn AdminSdk>,
    registry: Arc<AppRegistry>,
}
impl std::fmt::Debug for ClientFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientFactory")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl ClientFactory {
    pub fn new(sdk: Arc<dyn AdminSdk>, registry: Arc<AppRegistry>) -> Self {
        ClientFactory { sdk, registry }
    }

    pub fn registry(&self) -> &Arc<AppRegistry> {
        &self.registry
    }

    /// Converts the credential and calls the SDK's initializer exactly once
    ///
    /// The app is named after `options.app_name`, falling back to `default_name`.
    /// SDK errors are returned unchanged.
    pub fn initialize(
        &self,
        options: &AdminOptions,
        default_name: &str,
    ) -> Result<FirebaseApp, AdminModuleError> {
        let credential = self.sdk.cert(&options.credential)?;
        let app_options = AppOptions {
            credential,
            database_url: options.database_url.clone(),
            database_auth_variable_override: options.database_auth_variable_override.clone(),
            service_account_id: options.service_account_id.clone(),
            storage_bucket: options.storage_bucket.clone(),
            project_id: options.project_id.clone(),
            http_agent: options.http_agent.clone(),
        };

        let name = options.app_name.as_deref().unwrap_or(default_name);
        let sdk = &self.sdk;
        let app = self
            .registry
            .register(name, app_options, |name, options| sdk.initialize_app(name, options))
            .inspect_err(|e| tracing::error!("Failed to initialize Firebase app '{name}': {e}"))?;

        tracing::info!(
            "Initialized Firebase app '{name}' for project '{}'",
            app.options().credential.project_id
        );
        Ok(app)
    }
}
