use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::{app::FirebaseApp, errors::ServiceError, sdk::KeyValueStore};

/// Realtime database of the registration's app
///
/// ```ignore
/// database.set("users/123", &User { name: "John".into(), age: 30 }).await?;
/// let user: Option<User> = database.get("users/123").await?;
/// let key = database.push("users", &User { name: "Jane".into(), age: 28 }).await?;
/// ```
#[derive(Clone)]
pub struct DatabaseService {
    database: Arc<dyn KeyValueStore>,
}

impl DatabaseService {
    pub fn new(app: &FirebaseApp) -> Self {
        DatabaseService {
            database: app.database(),
        }
    }

    /// Value at `path`, `None` if nothing is stored there
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ServiceError> {
        let Some(value) = self.database.get(path).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(value)?))
    }

    pub async fn set<T: Serialize>(&self, path: &str, value: &T) -> Result<(), ServiceError> {
        Ok(self.database.set(path, serde_json::to_value(value)?).await?)
    }

    /// Updates only the fields present in `values`
    pub async fn update<T: Serialize>(&self, path: &str, values: &T) -> Result<(), ServiceError> {
        let serde_json::Value::Object(values) = serde_json::to_value(values)? else {
            return Err(ServiceError::InvalidArgument("Update data must be an object"));
        };
        Ok(self.database.update(path, values).await?)
    }

    pub async fn remove(&self, path: &str) -> Result<(), ServiceError> {
        Ok(self.database.remove(path).await?)
    }

    /// Appends `value` under a generated key and returns the key, empty if the store reported none
    pub async fn push<T: Serialize>(&self, path: &str, value: &T) -> Result<String, ServiceError> {
        let key = self.database.push(path, serde_json::to_value(value)?).await?;
        Ok(key.unwrap_or_default())
    }
}

