use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::SdkError;

/// Properties for creating or updating a user, unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProperties {
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub disabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub uid: String,
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub phone_number: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    pub custom_claims: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersResult {
    pub users: Vec<UserRecord>,
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedIdToken {
    pub uid: String,
    #[serde(flatten)]
    pub claims: serde_json::Map<String, serde_json::Value>,
}

/// User management client of an app
#[async_trait]
pub trait UserManagement: Send + Sync {
    async fn create_user(&self, properties: UserProperties) -> Result<UserRecord, SdkError>;
    async fn get_user(&self, uid: &str) -> Result<UserRecord, SdkError>;
    async fn get_user_by_email(&self, email: &str) -> Result<UserRecord, SdkError>;
    async fn get_user_by_phone_number(&self, phone_number: &str) -> Result<UserRecord, SdkError>;
    async fn update_user(
        &self,
        uid: &str,
        properties: UserProperties,
    ) -> Result<UserRecord, SdkError>;
    async fn delete_user(&self, uid: &str) -> Result<(), SdkError>;
    async fn create_custom_token(
        &self,
        uid: &str,
        claims: Option<serde_json::Value>,
    ) -> Result<String, SdkError>;
    async fn verify_id_token(&self, id_token: &str) -> Result<DecodedIdToken, SdkError>;
    async fn set_custom_user_claims(
        &self,
        uid: &str,
        claims: Option<serde_json::Value>,
    ) -> Result<(), SdkError>;
    async fn list_users(
        &self,
        max_results: Option<u32>,
        page_token: Option<String>,
    ) -> Result<ListUsersResult, SdkError>;
}
