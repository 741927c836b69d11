//! Outbound notification seam for token and activation-link delivery.

use async_trait::async_trait;

use crate::errors::DomainResult;

use super::types::OtpChannel;

/// Sends tokens and activation links to users. Implementations wrap an
/// email or SMS provider; failures surface as `AuthError::DeliveryFailure`.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Deliver a one-time token over the given channel
    async fn send_otp(
        &self,
        channel: OtpChannel,
        destination: &str,
        token: &str,
    ) -> DomainResult<()>;

    /// Deliver an account activation link by email
    async fn send_activation_link(&self, destination: &str, link: &str) -> DomainResult<()>;
}
