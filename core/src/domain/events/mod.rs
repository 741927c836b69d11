//! Authentication domain events and the in-process bus that fans them out.
//!
//! Services publish events after state changes; observers react without
//! being able to abort the triggering operation. A failing observer is
//! logged and skipped.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::otp::OtpReason;
use crate::errors::DomainResult;

/// Events emitted by the authentication services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEvent {
    /// A login was attempted, successfully or not
    LoginAttempt {
        user_id: Option<Uuid>,
        identifier: String,
        success: bool,
        is_admin: bool,
    },
    /// An OTP challenge was verified
    OtpVerified { user_id: Uuid, reason: OtpReason },
    /// A wrong token was entered against a live challenge
    OtpFailed {
        user_id: Uuid,
        reason: OtpReason,
        attempts: u32,
    },
    /// A challenge expired before it was consumed
    OtpExpired { user_id: Uuid, reason: OtpReason },
    /// A user was blocked after repeated abuse
    UserBlocked { user_id: Uuid },
}

/// Receives published events. Implementations must tolerate being called
/// concurrently.
#[async_trait]
pub trait EventObserver: Send + Sync {
    async fn on_event(&self, event: &AuthEvent) -> DomainResult<()>;
}

/// Fan-out bus over a fixed set of observers. Observers are registered
/// before the bus is shared; publishing never mutates the bus.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Arc<dyn EventObserver>>,
}

impl EventBus {
    /// Creates an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer. Called during wiring, before the bus is
    /// wrapped in an `Arc`.
    pub fn subscribe(&mut self, observer: Arc<dyn EventObserver>) {
        self.observers.push(observer);
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Delivers the event to every observer in registration order.
    /// Observer errors are logged and do not stop delivery.
    pub async fn publish(&self, event: &AuthEvent) {
        for observer in &self.observers {
            if let Err(e) = observer.on_event(event).await {
                tracing::warn!(
                    event = "event_observer_failed",
                    error = %e,
                    "Event observer returned an error"
                );
            }
        }
    }
}
