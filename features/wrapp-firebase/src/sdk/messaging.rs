use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::SdkError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: Option<String>,
    pub body: Option<String>,
    pub image_url: Option<String>,
}

/// Message content shared by all message kinds
///
/// Platform specific overrides are passed to the SDK as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub notification: Option<Notification>,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
    pub android: Option<serde_json::Value>,
    pub apns: Option<serde_json::Value>,
    pub webpush: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageTarget {
    Token(String),
    Topic(String),
    Condition(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub target: MessageTarget,
    #[serde(flatten)]
    pub payload: MessagePayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MulticastMessage {
    pub tokens: Vec<String>,
    #[serde(flatten)]
    pub payload: MessagePayload,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    pub message_id: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub success_count: usize,
    pub failure_count: usize,
    pub responses: Vec<SendResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicManagementError {
    /// Index of the failed registration token
    pub index: usize,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicManagementResponse {
    pub success_count: usize,
    pub failure_count: usize,
    pub errors: Vec<TopicManagementError>,
}

/// Cloud messaging client of an app
#[async_trait]
pub trait PushMessaging: Send + Sync {
    /// Sends a message, returning the message id
    async fn send(&self, message: Message) -> Result<String, SdkError>;
    async fn send_each_for_multicast(
        &self,
        message: MulticastMessage,
    ) -> Result<BatchResponse, SdkError>;
    async fn subscribe_to_topic(
        &self,
        tokens: Vec<String>,
        topic: &str,
    ) -> Result<TopicManagementResponse, SdkError>;
    async fn unsubscribe_from_topic(
        &self,
        tokens: Vec<String>,
        topic: &str,
    ) -> Result<TopicManagementResponse, SdkError>;
}
