use std::path::PathBuf;

use serde::Deserialize;
use wrapp_config::{Config, ConfigSection};
use wrapp_di::{
    resolver::Resolver,
    types::{DependencyInfo, DynError},
    Construct, DiHandle,
};

use crate::{
    credential::{CredentialError, APPLICATION_CREDENTIALS_ENV},
    options::{AdminOptions, AdminOptionsFactory, ServiceAccount},
    strategy::AdminStrategy,
};

/// The `firebase` section of a config document
///
/// ```json
/// {
///   "firebase": {
///     "credential_file": "/etc/secrets/service-account.json",
///     "database_url": "https://demo.firebaseio.com"
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
    /// Inline key material, takes precedence over `credential_file`
    pub credential: Option<ServiceAccount>,
    /// Path to a service account key file
    pub credential_file: Option<PathBuf>,
    pub database_url: Option<String>,
    pub storage_bucket: Option<String>,
    pub project_id: Option<String>,
    pub service_account_id: Option<String>,
    pub app_name: Option<String>,
}
impl ConfigSection for AdminSettings {
    const SECTION: &'static str = "firebase";
}

impl AdminSettings {
    /// Reads the settings from `FIREBASE_*` environment variables
    ///
    /// The inline credential is only set when project id, client email and private key
    /// are all present. `GOOGLE_APPLICATION_CREDENTIALS` becomes the credential file.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let credential = match (
            lookup("FIREBASE_PROJECT_ID"),
            lookup("FIREBASE_CLIENT_EMAIL"),
            lookup("FIREBASE_PRIVATE_KEY"),
        ) {
            (Some(project_id), Some(client_email), Some(private_key)) => Some(ServiceAccount {
                project_id,
                client_email,
                private_key,
            }),
            _ => None,
        };

        AdminSettings {
            credential,
            credential_file: lookup(APPLICATION_CREDENTIALS_ENV).map(PathBuf::from),
            database_url: lookup("FIREBASE_DATABASE_URL"),
            storage_bucket: lookup("FIREBASE_STORAGE_BUCKET"),
            project_id: lookup("FIREBASE_PROJECT_ID"),
            service_account_id: lookup("FIREBASE_SERVICE_ACCOUNT_ID"),
            app_name: lookup("FIREBASE_APP_NAME"),
        }
    }

    /// Builds the options, loading the credential from the inline key, the credential
    /// file or the application default credentials, in that order
    pub fn into_options(&self) -> Result<AdminOptions, CredentialError> {
        let credential = match (&self.credential, &self.credential_file) {
            (Some(account), _) => account.clone(),
            (None, Some(path)) => ServiceAccount::from_file(path)?,
            (None, None) => ServiceAccount::application_default()?,
        };

        Ok(AdminOptions {
            credential,
            database_url: self.database_url.clone(),
            storage_bucket: self.storage_bucket.clone(),
            project_id: self.project_id.clone(),
            service_account_id: self.service_account_id.clone(),
            app_name: self.app_name.clone(),
            ..Default::default()
        })
    }
}

/// [AdminOptionsFactory] reading [AdminSettings] from the injected config provider
pub struct SettingsOptionsFactory {
    settings: Config<AdminSettings>,
}
impl Construct for SettingsOptionsFactory {
    fn dependencies() -> Vec<DependencyInfo> {
        vec![Config::<AdminSettings>::dependency_info()]
    }

    async fn construct(mut di: DiHandle) -> Result<Self, DynError> {
        let settings = di.resolve::<Config<AdminSettings>>().await?;
        Ok(SettingsOptionsFactory { settings })
    }
}
impl AdminOptionsFactory for SettingsOptionsFactory {
    async fn create_admin_options(&self) -> Result<AdminOptions, DynError> {
        Ok(self.settings.into_options()?)
    }
}

impl AdminStrategy {
    /// Options built from the [AdminSettings] registered with the container's config provider
    pub fn from_config() -> Self {
        AdminStrategy::class::<SettingsOptionsFactory>()
    }
}
