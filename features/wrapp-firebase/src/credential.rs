use std::{
    fmt::Debug,
    path::{Path, PathBuf},
};

use crate::options::ServiceAccount;

/// Environment variable pointing at the application default service account file
pub const APPLICATION_CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

#[derive(thiserror::Error, Debug)]
pub enum CredentialError {
    #[error("Service account object must contain a string \"{0}\" property")]
    MissingField(&'static str),
    #[error("Failed to read service account file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse service account json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("No credential configured and {APPLICATION_CREDENTIALS_ENV} is not set")]
    NoApplicationDefault,
}

/// Credential object the SDK is initialized with
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
}
impl Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .finish_non_exhaustive()
    }
}

impl Credential {
    /// Turns service account key material into a credential
    ///
    /// Pure: validates the required fields and restores newlines in keys that were
    /// stored with escaped `\n` sequences (common for keys kept in env variables).
    pub fn cert(account: &ServiceAccount) -> Result<Credential, CredentialError> {
        let required = [
            ("project_id", &account.project_id),
            ("private_key", &account.private_key),
            ("client_email", &account.client_email),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CredentialError::MissingField(field));
            }
        }

        Ok(Credential {
            project_id: account.project_id.clone(),
            client_email: account.client_email.clone(),
            private_key: account.private_key.replace("\\n", "\n"),
        })
    }
}

impl ServiceAccount {
    pub fn from_json(json: &str) -> Result<Self, CredentialError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CredentialError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CredentialError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Loads the service account referenced by `GOOGLE_APPLICATION_CREDENTIALS`
    pub fn application_default() -> Result<Self, CredentialError> {
        let path = std::env::var_os(APPLICATION_CREDENTIALS_ENV)
            .ok_or(CredentialError::NoApplicationDefault)?;
        tracing::debug!("Loading application default credentials from {path:?}");
        Self::from_file(path)
    }
}
