use std::sync::Arc;

use crate::{
    app::FirebaseApp,
    errors::ServiceError,
    sdk::{DecodedIdToken, ListUsersResult, UserManagement, UserProperties, UserRecord},
};

/// User management of the registration's app
#[derive(Clone)]
pub struct AuthService {
    auth: Arc<dyn UserManagement>,
}

impl AuthService {
    pub fn new(app: &FirebaseApp) -> Self {
        AuthService { auth: app.auth() }
    }

    pub async fn create_user(
        &self,
        properties: UserProperties,
    ) -> Result<UserRecord, ServiceError> {
        Ok(self.auth.create_user(properties).await?)
    }

    pub async fn get_user(&self, uid: &str) -> Result<UserRecord, ServiceError> {
        Ok(self.auth.get_user(uid).await?)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<UserRecord, ServiceError> {
        Ok(self.auth.get_user_by_email(email).await?)
    }

    pub async fn get_user_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<UserRecord, ServiceError> {
        Ok(self.auth.get_user_by_phone_number(phone_number).await?)
    }

    pub async fn update_user(
        &self,
        uid: &str,
        properties: UserProperties,
    ) -> Result<UserRecord, ServiceError> {
        Ok(self.auth.update_user(uid, properties).await?)
    }

    pub async fn delete_user(&self, uid: &str) -> Result<(), ServiceError> {
        Ok(self.auth.delete_user(uid).await?)
    }

    /// Creates a token the client signs in with, carrying the optional developer claims
    pub async fn create_custom_token(
        &self,
        uid: &str,
        claims: Option<serde_json::Value>,
    ) -> Result<String, ServiceError> {
        Ok(self.auth.create_custom_token(uid, claims).await?)
    }

    pub async fn verify_id_token(&self, id_token: &str) -> Result<DecodedIdToken, ServiceError> {
        Ok(self.auth.verify_id_token(id_token).await?)
    }

    /// Replaces the user's custom claims, `None` removes them
    pub async fn set_custom_user_claims(
        &self,
        uid: &str,
        claims: Option<serde_json::Value>,
    ) -> Result<(), ServiceError> {
        Ok(self.auth.set_custom_user_claims(uid, claims).await?)
    }

    pub async fn list_users(
        &self,
        max_results: Option<u32>,
        page_token: Option<String>,
    ) -> Result<ListUsersResult, ServiceError> {
        Ok(self.auth.list_users(max_results, page_token).await?)
    }
}
