use std::sync::Arc;

use crate::{
    app::{AppRegistry, FirebaseApp},
    errors::ServiceError,
    options::ServiceAccount,
};

/// Access to the registration's app and the registry it lives in
#[derive(Debug, Clone)]
pub struct AdminService {
    app: FirebaseApp,
    registry: Arc<AppRegistry>,
}

impl AdminService {
    pub fn new(app: FirebaseApp, registry: Arc<AppRegistry>) -> Self {
        AdminService { app, registry }
    }

    /// The app of this registration
    pub fn app(&self) -> &FirebaseApp {
        &self.app
    }

    pub fn apps(&self) -> Vec<FirebaseApp> {
        self.registry.get_apps()
    }

    pub fn get_app(&self, name: &str) -> Result<FirebaseApp, ServiceError> {
        Ok(self.registry.get_app(name)?)
    }

    pub async fn delete_app(&self, app: &FirebaseApp) -> Result<(), ServiceError> {
        Ok(app.delete().await?)
    }

    /// Key material of the application default credentials
    pub fn application_default(&self) -> Result<ServiceAccount, ServiceError> {
        Ok(ServiceAccount::application_default()?)
    }
}
