use async_trait::async_trait;

use super::SdkError;

/// Realtime database client, addressed by slash separated paths
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value at `path`, `None` if nothing is stored there
    async fn get(&self, path: &str) -> Result<Option<serde_json::Value>, SdkError>;
    /// Overwrites the value at `path`
    async fn set(&self, path: &str, value: serde_json::Value) -> Result<(), SdkError>;
    /// Updates only the given children of `path`
    async fn update(
        &self,
        path: &str,
        values: serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), SdkError>;
    async fn remove(&self, path: &str) -> Result<(), SdkError>;
    /// Appends a child with a generated key, returning the key if the store reports one
    async fn push(&self, path: &str, value: serde_json::Value) -> Result<Option<String>, SdkError>;
}
