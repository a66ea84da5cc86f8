//! In-memory stand-in for the Firebase Admin SDK, recording every call the module makes
#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::{Map, Value};
use wrapp_firebase::{
    sdk::{
        AdminSdk, AppOptions, BatchResponse, DecodedIdToken, DocumentStore, KeyValueStore,
        ListUsersResult, Message, MulticastMessage, PushMessaging, QueryConstraint, SdkApp,
        SdkError, SendResponse, SetOptions, TopicManagementResponse, UserManagement,
        UserProperties, UserRecord,
    },
    AdminModule, AppRegistry, Credential, ServiceAccount,
};

#[derive(Default)]
pub struct Recorded {
    pub certs: Vec<ServiceAccount>,
    pub initialized: Vec<(String, AppOptions)>,
    pub fail_initialize: Option<String>,
}

/// Records the calls into the SDK and hands out [MemoryApp]s
#[derive(Clone, Default)]
pub struct RecordingSdk {
    recorded: Arc<Mutex<Recorded>>,
    pub app: Arc<MemoryApp>,
}
impl RecordingSdk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        let sdk = Self::default();
        sdk.recorded.lock().unwrap().fail_initialize = Some(message.to_string());
        sdk
    }

    pub fn cert_calls(&self) -> usize {
        self.recorded.lock().unwrap().certs.len()
    }

    pub fn initialize_calls(&self) -> usize {
        self.recorded.lock().unwrap().initialized.len()
    }

    pub fn initialized(&self) -> Vec<(String, AppOptions)> {
        self.recorded.lock().unwrap().initialized.clone()
    }

    /// Module using this SDK and a fresh registry
    pub fn module(&self) -> AdminModule {
        AdminModule::with_registry(Arc::new(self.clone()), AppRegistry::new())
    }
}

impl AdminSdk for RecordingSdk {
    fn cert(&self, account: &ServiceAccount) -> Result<Credential, SdkError> {
        self.recorded.lock().unwrap().certs.push(account.clone());
        Ok(Credential::cert(account)?)
    }

    fn initialize_app(
        &self,
        name: &str,
        options: &AppOptions,
    ) -> Result<Arc<dyn SdkApp>, SdkError> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.initialized.push((name.to_string(), options.clone()));
        match &recorded.fail_initialize {
            Some(message) => Err(SdkError::service("app/invalid-app-options", message.clone())),
            None => Ok(self.app.clone()),
        }
    }
}

#[derive(Default)]
pub struct MemoryApp {
    pub auth: Arc<MemoryAuth>,
    pub database: Arc<MemoryDatabase>,
    pub firestore: Arc<MemoryFirestore>,
    pub messaging: Arc<MemoryMessaging>,
    pub deleted: Mutex<bool>,
}

#[async_trait]
impl SdkApp for MemoryApp {
    fn auth(&self) -> Arc<dyn UserManagement> {
        self.auth.clone()
    }

    fn database(&self) -> Arc<dyn KeyValueStore> {
        self.database.clone()
    }

    fn firestore(&self) -> Arc<dyn DocumentStore> {
        self.firestore.clone()
    }

    fn messaging(&self) -> Arc<dyn PushMessaging> {
        self.messaging.clone()
    }

    async fn delete(&self) -> Result<(), SdkError> {
        *self.deleted.lock().unwrap() = true;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryAuth {
    pub users: Mutex<BTreeMap<String, UserRecord>>,
}

fn user_not_found() -> SdkError {
    SdkError::service(
        "auth/user-not-found",
        "There is no user record corresponding to the provided identifier.",
    )
}

impl MemoryAuth {
    fn find(&self, matches: impl Fn(&UserRecord) -> bool) -> Result<UserRecord, SdkError> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|user| matches(*user))
            .cloned()
            .ok_or_else(user_not_found)
    }
}

fn apply(user: &mut UserRecord, properties: UserProperties) {
    if properties.email.is_some() {
        user.email = properties.email;
    }
    if properties.phone_number.is_some() {
        user.phone_number = properties.phone_number;
    }
    if properties.display_name.is_some() {
        user.display_name = properties.display_name;
    }
    if properties.photo_url.is_some() {
        user.photo_url = properties.photo_url;
    }
    if let Some(verified) = properties.email_verified {
        user.email_verified = verified;
    }
    if let Some(disabled) = properties.disabled {
        user.disabled = disabled;
    }
}

#[async_trait]
impl UserManagement for MemoryAuth {
    async fn create_user(&self, properties: UserProperties) -> Result<UserRecord, SdkError> {
        let mut users = self.users.lock().unwrap();
        let mut user = UserRecord {
            uid: format!("uid-{}", users.len() + 1),
            ..Default::default()
        };
        apply(&mut user, properties);
        users.insert(user.uid.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, uid: &str) -> Result<UserRecord, SdkError> {
        self.find(|user| user.uid == uid)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<UserRecord, SdkError> {
        self.find(|user| user.email.as_deref() == Some(email))
    }

    async fn get_user_by_phone_number(&self, phone_number: &str) -> Result<UserRecord, SdkError> {
        self.find(|user| user.phone_number.as_deref() == Some(phone_number))
    }

    async fn update_user(
        &self,
        uid: &str,
        properties: UserProperties,
    ) -> Result<UserRecord, SdkError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(uid).ok_or_else(user_not_found)?;
        apply(user, properties);
        Ok(user.clone())
    }

    async fn delete_user(&self, uid: &str) -> Result<(), SdkError> {
        self.users
            .lock()
            .unwrap()
            .remove(uid)
            .map(|_| ())
            .ok_or_else(user_not_found)
    }

    async fn create_custom_token(
        &self,
        uid: &str,
        claims: Option<Value>,
    ) -> Result<String, SdkError> {
        Ok(format!("token:{uid}:{}", claims.unwrap_or_default()))
    }

    async fn verify_id_token(&self, id_token: &str) -> Result<DecodedIdToken, SdkError> {
        let uid = id_token
            .strip_prefix("id:")
            .ok_or_else(|| {
                SdkError::service("auth/argument-error", "Decoding Firebase ID token failed.")
            })?;
        Ok(DecodedIdToken {
            uid: uid.to_string(),
            claims: Map::new(),
        })
    }

    async fn set_custom_user_claims(
        &self,
        uid: &str,
        claims: Option<Value>,
    ) -> Result<(), SdkError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(uid).ok_or_else(user_not_found)?;
        user.custom_claims = match claims {
            Some(Value::Object(claims)) => Some(claims),
            _ => None,
        };
        Ok(())
    }

    async fn list_users(
        &self,
        max_results: Option<u32>,
        page_token: Option<String>,
    ) -> Result<ListUsersResult, SdkError> {
        let users = self.users.lock().unwrap();
        let mut remaining = users
            .values()
            .filter(|user| page_token.as_ref().map_or(true, |token| &user.uid > token));
        let page: Vec<UserRecord> = remaining
            .by_ref()
            .take(max_results.unwrap_or(1000) as usize)
            .cloned()
            .collect();
        let page_token = match remaining.next() {
            Some(_) => page.last().map(|user| user.uid.clone()),
            None => None,
        };
        Ok(ListUsersResult { users: page, page_token })
    }
}

#[derive(Default)]
pub struct MemoryDatabase {
    pub values: Mutex<BTreeMap<String, Value>>,
    /// Key reported by `push`, `None` mimics a store that does not report one
    pub push_key: Mutex<Option<String>>,
}

#[async_trait]
impl KeyValueStore for MemoryDatabase {
    async fn get(&self, path: &str) -> Result<Option<Value>, SdkError> {
        Ok(self.values.lock().unwrap().get(path).cloned())
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), SdkError> {
        self.values.lock().unwrap().insert(path.to_string(), value);
        Ok(())
    }

    async fn update(&self, path: &str, values: Map<String, Value>) -> Result<(), SdkError> {
        let mut stored = self.values.lock().unwrap();
        let entry = stored
            .entry(path.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(existing) = entry {
            existing.extend(values);
        }
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), SdkError> {
        self.values.lock().unwrap().remove(path);
        Ok(())
    }

    async fn push(&self, path: &str, value: Value) -> Result<Option<String>, SdkError> {
        let key = self.push_key.lock().unwrap().clone();
        if let Some(key) = &key {
            self.values.lock().unwrap().insert(format!("{path}/{key}"), value);
        }
        Ok(key)
    }
}

#[derive(Default)]
pub struct MemoryFirestore {
    pub documents: Mutex<BTreeMap<String, Value>>,
    pub queries: Mutex<Vec<(String, Vec<QueryConstraint>)>>,
}

#[async_trait]
impl DocumentStore for MemoryFirestore {
    async fn get(&self, path: &str) -> Result<Option<Value>, SdkError> {
        Ok(self.documents.lock().unwrap().get(path).cloned())
    }

    async fn set(&self, path: &str, data: Value, options: SetOptions) -> Result<(), SdkError> {
        let mut documents = self.documents.lock().unwrap();
        if let (true, Some(Value::Object(existing)), Value::Object(fields)) =
            (options.merge, documents.get_mut(path), &data)
        {
            existing.extend(fields.clone());
            return Ok(());
        }
        documents.insert(path.to_string(), data);
        Ok(())
    }

    async fn update(&self, path: &str, data: Map<String, Value>) -> Result<(), SdkError> {
        let mut documents = self.documents.lock().unwrap();
        match documents.get_mut(path) {
            Some(Value::Object(existing)) => {
                existing.extend(data);
                Ok(())
            }
            _ => Err(SdkError::service(
                "firestore/not-found",
                format!("No document to update: {path}"),
            )),
        }
    }

    async fn delete(&self, path: &str) -> Result<(), SdkError> {
        self.documents.lock().unwrap().remove(path);
        Ok(())
    }

    async fn add(&self, collection: &str, data: Value) -> Result<String, SdkError> {
        let mut documents = self.documents.lock().unwrap();
        let path = format!("{collection}/doc-{}", documents.len() + 1);
        documents.insert(path.clone(), data);
        Ok(path)
    }

    async fn query(
        &self,
        collection: &str,
        constraints: Vec<QueryConstraint>,
    ) -> Result<Vec<Value>, SdkError> {
        self.queries
            .lock()
            .unwrap()
            .push((collection.to_string(), constraints));
        let prefix = format!("{collection}/");
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|(path, _)| path.starts_with(&prefix))
            .map(|(_, data)| data.clone())
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryMessaging {
    pub sent: Mutex<Vec<Message>>,
    pub multicast: Mutex<Vec<MulticastMessage>>,
    pub topics: Mutex<BTreeMap<String, Vec<String>>>,
}

#[async_trait]
impl PushMessaging for MemoryMessaging {
    async fn send(&self, message: Message) -> Result<String, SdkError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(message);
        Ok(format!("projects/p/messages/{}", sent.len()))
    }

    async fn send_each_for_multicast(
        &self,
        message: MulticastMessage,
    ) -> Result<BatchResponse, SdkError> {
        let responses: Vec<SendResponse> = message
            .tokens
            .iter()
            .enumerate()
            .map(|(i, token)| match token.is_empty() {
                true => SendResponse {
                    message_id: None,
                    error: Some("messaging/invalid-registration-token".to_string()),
                },
                false => SendResponse {
                    message_id: Some(format!("projects/p/messages/m{i}")),
                    error: None,
                },
            })
            .collect();
        let failure_count = responses.iter().filter(|r| r.error.is_some()).count();
        self.multicast.lock().unwrap().push(message);

        Ok(BatchResponse {
            success_count: responses.len() - failure_count,
            failure_count,
            responses,
        })
    }

    async fn subscribe_to_topic(
        &self,
        tokens: Vec<String>,
        topic: &str,
    ) -> Result<TopicManagementResponse, SdkError> {
        let count = tokens.len();
        self.topics
            .lock()
            .unwrap()
            .entry(topic.to_string())
            .or_default()
            .extend(tokens);
        Ok(TopicManagementResponse {
            success_count: count,
            ..Default::default()
        })
    }

    async fn unsubscribe_from_topic(
        &self,
        tokens: Vec<String>,
        topic: &str,
    ) -> Result<TopicManagementResponse, SdkError> {
        let mut topics = self.topics.lock().unwrap();
        let subscribed = topics.entry(topic.to_string()).or_default();
        subscribed.retain(|token| !tokens.contains(token));
        Ok(TopicManagementResponse {
            success_count: tokens.len(),
            ..Default::default()
        })
    }
}
