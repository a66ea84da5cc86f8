use std::sync::Arc;

use crate::{
    app::FirebaseApp,
    errors::ServiceError,
    sdk::{
        BatchResponse, Message, MessagePayload, MessageTarget, MulticastMessage, PushMessaging,
        TopicManagementResponse,
    },
};

/// Cloud messaging of the registration's app
#[derive(Clone)]
pub struct MessagingService {
    messaging: Arc<dyn PushMessaging>,
}

impl MessagingService {
    pub fn new(app: &FirebaseApp) -> Self {
        MessagingService {
            messaging: app.messaging(),
        }
    }

    /// Sends `payload` to a single device, returning the message id
    pub async fn send_to_device(
        &self,
        token: impl Into<String>,
        payload: MessagePayload,
    ) -> Result<String, ServiceError> {
        self.send(MessageTarget::Token(token.into()), payload).await
    }

    pub async fn send_to_devices(
        &self,
        tokens: Vec<String>,
        payload: MessagePayload,
    ) -> Result<BatchResponse, ServiceError> {
        let message = MulticastMessage { tokens, payload };
        Ok(self.messaging.send_each_for_multicast(message).await?)
    }

    /// Sends `payload` to every device subscribed to `topic`, returning the message id
    pub async fn send_to_topic(
        &self,
        topic: impl Into<String>,
        payload: MessagePayload,
    ) -> Result<String, ServiceError> {
        self.send(MessageTarget::Topic(topic.into()), payload).await
    }

    pub async fn subscribe_to_topic(
        &self,
        tokens: Vec<String>,
        topic: &str,
    ) -> Result<TopicManagementResponse, ServiceError> {
        Ok(self.messaging.subscribe_to_topic(tokens, topic).await?)
    }

    pub async fn unsubscribe_from_topic(
        &self,
        tokens: Vec<String>,
        topic: &str,
    ) -> Result<TopicManagementResponse, ServiceError> {
        Ok(self.messaging.unsubscribe_from_topic(tokens, topic).await?)
    }

    async fn send(
        &self,
        target: MessageTarget,
        payload: MessagePayload,
    ) -> Result<String, ServiceError> {
        Ok(self.messaging.send(Message { target, payload }).await?)
    }
}
