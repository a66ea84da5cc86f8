use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::SdkError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOptions {
    /// Merge into the existing document instead of replacing it
    pub merge: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "array-contains")]
    ArrayContains,
    #[serde(rename = "in")]
    In,
}

/// A constraint applied to a collection query, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryConstraint {
    Where {
        field: String,
        op: FilterOp,
        value: serde_json::Value,
    },
    OrderBy {
        field: String,
        descending: bool,
    },
    Limit(usize),
}

/// Firestore client, documents are addressed by `collection/id` paths
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Document data, `None` if the document does not exist
    async fn get(&self, path: &str) -> Result<Option<serde_json::Value>, SdkError>;
    async fn set(
        &self,
        path: &str,
        data: serde_json::Value,
        options: SetOptions,
    ) -> Result<(), SdkError>;
    async fn update(
        &self,
        path: &str,
        data: serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), SdkError>;
    async fn delete(&self, path: &str) -> Result<(), SdkError>;
    /// Adds a document with a generated id, returning its path
    async fn add(&self, collection: &str, data: serde_json::Value) -> Result<String, SdkError>;
    async fn query(
        &self,
        collection: &str,
        constraints: Vec<QueryConstraint>,
    ) -> Result<Vec<serde_json::Value>, SdkError>;
}
