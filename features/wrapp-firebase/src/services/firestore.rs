use std::sync::Arc;

use crate::{
    app::FirebaseApp,
    errors::ServiceError,
    sdk::{DocumentStore, QueryConstraint, SetOptions},
};

/// Firestore of the registration's app
#[derive(Clone)]
pub struct FirestoreService {
    firestore: Arc<dyn DocumentStore>,
}

impl FirestoreService {
    pub fn new(app: &FirebaseApp) -> Self {
        FirestoreService {
            firestore: app.firestore(),
        }
    }

    /// Document data, `None` if the document does not exist
    pub async fn get(&self, path: &str) -> Result<Option<serde_json::Value>, ServiceError> {
        Ok(self.firestore.get(path).await?)
    }

    /// Overwrites the document, or merges into it when `options` say so
    pub async fn set(
        &self,
        path: &str,
        data: serde_json::Value,
        options: Option<SetOptions>,
    ) -> Result<(), ServiceError> {
        Ok(self
            .firestore
            .set(path, data, options.unwrap_or_default())
            .await?)
    }

    /// Partially updates the document, `data` must be a JSON object
    pub async fn update(&self, path: &str, data: serde_json::Value) -> Result<(), ServiceError> {
        let serde_json::Value::Object(fields) = data else {
            return Err(ServiceError::InvalidArgument("Update data must be a non-null object"));
        };
        Ok(self.firestore.update(path, fields).await?)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ServiceError> {
        Ok(self.firestore.delete(path).await?)
    }

    /// Adds a document with a generated id and returns its path
    pub async fn add(
        &self,
        collection: &str,
        data: serde_json::Value,
    ) -> Result<String, ServiceError> {
        Ok(self.firestore.add(collection, data).await?)
    }

    /// Data of every document matching `constraints`, applied in order
    pub async fn query(
        &self,
        collection: &str,
        constraints: Vec<QueryConstraint>,
    ) -> Result<Vec<serde_json::Value>, ServiceError> {
        Ok(self.firestore.query(collection, constraints).await?)
    }
}
