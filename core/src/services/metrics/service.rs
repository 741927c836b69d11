//! Login attempt tracking and time-bucketed aggregation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::login_attempt::{AttemptTotals, LoginAttemptRecord};
use crate::domain::events::{AuthEvent, EventObserver};
use crate::errors::DomainResult;
use crate::repositories::LoginAttemptRepository;

/// Records login attempts as append-only rows and sums them over
/// standard windows. Also usable as an [`EventObserver`], so wiring it
/// onto the event bus captures every attempt the authentication service
/// publishes.
pub struct LoginAttemptTracker<R: LoginAttemptRepository> {
    repository: Arc<R>,
}

impl<R: LoginAttemptRepository> LoginAttemptTracker<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn record_success(&self, user_id: Uuid, is_admin: bool) -> DomainResult<()> {
        self.repository
            .append(LoginAttemptRecord::success(user_id, is_admin))
            .await
    }

    pub async fn record_failure(&self, user_id: Option<Uuid>) -> DomainResult<()> {
        self.repository
            .append(LoginAttemptRecord::failure(user_id))
            .await
    }

    /// Sums over an arbitrary window
    pub async fn aggregate(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<AttemptTotals> {
        self.repository.sum_between(start, end).await
    }

    async fn window(&self, length: Duration) -> DomainResult<AttemptTotals> {
        let end = Utc::now();
        self.repository.sum_between(end - length, end).await
    }

    /// Last 24 hours
    pub async fn hourly_metrics(&self) -> DomainResult<AttemptTotals> {
        self.window(Duration::hours(24)).await
    }

    /// Last 12 hours
    pub async fn twelve_hour_metrics(&self) -> DomainResult<AttemptTotals> {
        self.window(Duration::hours(12)).await
    }

    /// Last day
    pub async fn daily_metrics(&self) -> DomainResult<AttemptTotals> {
        self.window(Duration::days(1)).await
    }

    /// Last 7 days
    pub async fn weekly_metrics(&self) -> DomainResult<AttemptTotals> {
        self.window(Duration::weeks(1)).await
    }

    /// Last 30 days
    pub async fn monthly_metrics(&self) -> DomainResult<AttemptTotals> {
        self.window(Duration::days(30)).await
    }

    /// Last 365 days
    pub async fn yearly_metrics(&self) -> DomainResult<AttemptTotals> {
        self.window(Duration::days(365)).await
    }
}

#[async_trait]
impl<R: LoginAttemptRepository> EventObserver for LoginAttemptTracker<R> {
    async fn on_event(&self, event: &AuthEvent) -> DomainResult<()> {
        if let AuthEvent::LoginAttempt {
            user_id,
            success,
            is_admin,
            ..
        } = event
        {
            debug!(
                success = success,
                event = "login_attempt_recorded",
                "Recording login attempt row"
            );
            match (*success, user_id) {
                (true, Some(id)) => self.record_success(*id, *is_admin).await?,
                _ => self.record_failure(*user_id).await?,
            }
        }
        Ok(())
    }
}
