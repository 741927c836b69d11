//! Mock notification gateway for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::{AuthError, DomainResult};

use super::traits::NotificationGateway;
use super::types::OtpChannel;

/// One message captured by the mock gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub channel: OtpChannel,
    pub destination: String,
    pub body: String,
}

/// Records outbound messages instead of sending them
pub struct MockNotificationGateway {
    sent: Arc<RwLock<Vec<SentMessage>>>,
    fail_sends: Arc<RwLock<bool>>,
}

impl MockNotificationGateway {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            fail_sends: Arc::new(RwLock::new(false)),
        }
    }

    /// Makes subsequent sends fail with a delivery error
    pub async fn set_fail_sends(&self, fail: bool) {
        *self.fail_sends.write().await = fail;
    }

    pub async fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent.read().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }

    /// Body of the most recent message, if any
    pub async fn last_body(&self) -> Option<String> {
        self.sent.read().await.last().map(|m| m.body.clone())
    }

    fn channel_label(channel: OtpChannel) -> &'static str {
        match channel {
            OtpChannel::Email => "email",
            OtpChannel::Sms => "sms",
        }
    }
}

impl Default for MockNotificationGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationGateway for MockNotificationGateway {
    async fn send_otp(
        &self,
        channel: OtpChannel,
        destination: &str,
        token: &str,
    ) -> DomainResult<()> {
        if *self.fail_sends.read().await {
            return Err(AuthError::DeliveryFailure {
                channel: Self::channel_label(channel).to_string(),
            }
            .into());
        }
        self.sent.write().await.push(SentMessage {
            channel,
            destination: destination.to_string(),
            body: token.to_string(),
        });
        Ok(())
    }

    async fn send_activation_link(&self, destination: &str, link: &str) -> DomainResult<()> {
        if *self.fail_sends.read().await {
            return Err(AuthError::DeliveryFailure {
                channel: "email".to_string(),
            }
            .into());
        }
        self.sent.write().await.push(SentMessage {
            channel: OtpChannel::Email,
            destination: destination.to_string(),
            body: link.to_string(),
        });
        Ok(())
    }
}
