//! OTP verification service implementation.
//!
//! Drives the challenge lifecycle: issuing tokens, verifying them with
//! the two failure tiers (wrong guesses per token, request count per
//! session), auto-reissuing after expiry or exhaustion, and blocking
//! accounts that keep abusing the endpoint.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, error, info, warn};

use authkit_shared::validators::canonicalize_identifier;

use crate::domain::entities::otp::{OtpReason, OtpRecord};
use crate::domain::entities::user::User;
use crate::domain::events::{AuthEvent, EventBus};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{OtpStore, UserDirectory};

use super::config::OtpServiceConfig;
use super::lockout::{LockoutDecision, SessionLockout};
use super::traits::NotificationGateway;
use super::types::{ChallengeOutcome, OtpChannel, VerificationOutcome, VerifyStatus};

/// Service for issuing and verifying one-time tokens
pub struct OtpVerificationService<D, N, S>
where
    D: UserDirectory,
    N: NotificationGateway,
    S: OtpStore,
{
    directory: Arc<D>,
    gateway: Arc<N>,
    store: Arc<S>,
    event_bus: Arc<EventBus>,
    config: OtpServiceConfig,
}

impl<D, N, S> OtpVerificationService<D, N, S>
where
    D: UserDirectory,
    N: NotificationGateway,
    S: OtpStore,
{
    pub fn new(
        directory: Arc<D>,
        gateway: Arc<N>,
        store: Arc<S>,
        event_bus: Arc<EventBus>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            directory,
            gateway,
            store,
            event_bus,
            config,
        }
    }

    fn expiry(&self) -> Duration {
        Duration::seconds(self.config.expiry_seconds)
    }

    /// Where a token for this user goes. Email wins when both contact
    /// fields are present.
    fn delivery_target(&self, user: &User) -> DomainResult<(OtpChannel, String)> {
        if let Some(email) = user.email.as_deref() {
            return Ok((OtpChannel::Email, email.to_string()));
        }
        if let Some(phone) = user.phone_number.as_deref() {
            return Ok((OtpChannel::Sms, phone.to_string()));
        }
        Err(AuthError::NoContactAddress.into())
    }

    async fn dispatch(
        &self,
        record: &OtpRecord,
        channel: OtpChannel,
        destination: &str,
    ) -> DomainResult<()> {
        self.gateway
            .send_otp(channel, destination, &record.token)
            .await?;
        info!(
            user_id = %record.subject,
            reason = ?record.reason,
            event = "otp_sent",
            "One-time token dispatched"
        );
        Ok(())
    }

    /// Issues a challenge for the pair, reusing an unexpired active token
    /// rather than generating a second one. The record is persisted
    /// before dispatch, so a delivery failure leaves a resendable token
    /// behind.
    pub async fn issue_challenge(
        &self,
        user: &User,
        reason: OtpReason,
    ) -> DomainResult<ChallengeOutcome> {
        let (channel, destination) = self.delivery_target(user)?;

        if let Some(existing) = self.store.get(user.id, reason).await? {
            if !existing.is_terminal() && !existing.is_expired(self.expiry()) {
                debug!(
                    user_id = %user.id,
                    reason = ?reason,
                    event = "otp_reused",
                    "Active token still valid, not reissuing"
                );
                return Ok(ChallengeOutcome::AlreadyActive { destination });
            }
        }

        self.store.expire_active(user.id, reason).await?;
        let record = self.store.get_or_create(user.id, reason).await?;
        self.dispatch(&record, channel, &destination).await?;

        Ok(ChallengeOutcome::Sent {
            channel,
            destination,
        })
    }

    /// Redelivers the current token when one is still live, refreshing
    /// its expiry window; otherwise behaves like [`Self::issue_challenge`].
    /// No new token is generated while an active one exists, so a resend
    /// cannot invalidate a token the user is about to enter.
    pub async fn resend(&self, user: &User, reason: OtpReason) -> DomainResult<ChallengeOutcome> {
        if let Some(existing) = self.store.get(user.id, reason).await? {
            if !existing.is_terminal() && !existing.is_expired(self.expiry()) {
                // redeliver without touching last_sent_at, so the expiry
                // window cannot be stretched by repeated resends
                let (channel, destination) = self.delivery_target(user)?;
                self.dispatch(&existing, channel, &destination).await?;
                return Ok(ChallengeOutcome::AlreadyActive { destination });
            }
        }
        self.issue_challenge(user, reason).await
    }

    /// Retires the current token and dispatches a replacement with a
    /// clean guess counter, absorbing delivery errors. Used on the
    /// automatic reissue paths, where the verification status is the
    /// caller-visible result.
    async fn reissue_quietly(&self, user: &User, reason: OtpReason) {
        if let Err(e) = self.replace_challenge(user, reason).await {
            warn!(
                user_id = %user.id,
                reason = ?reason,
                error = %e,
                event = "otp_reissue_failed",
                "Could not reissue token after retiring the old one"
            );
        }
    }

    async fn replace_challenge(&self, user: &User, reason: OtpReason) -> DomainResult<()> {
        let (channel, destination) = self.delivery_target(user)?;
        self.store.expire_active(user.id, reason).await?;
        let record = self.store.get_or_create(user.id, reason).await?;
        self.dispatch(&record, channel, &destination).await
    }

    /// Verifies an entered token for the account the identifier resolves
    /// to.
    ///
    /// Most failures are reported as a [`VerifyStatus`], not an error:
    /// the caller is expected to relay the status to the end user.
    /// Expired and exhausted challenges are retired and automatically
    /// replaced with a fresh token.
    pub async fn verify(
        &self,
        identifier: &str,
        reason: OtpReason,
        token: &str,
    ) -> DomainResult<VerificationOutcome> {
        let (field, identifier) = canonicalize_identifier(identifier);
        let user = match self
            .directory
            .find_by_identifier(field, &identifier)
            .await?
        {
            Some(user) => user,
            None => {
                debug!(
                    field = field.as_str(),
                    event = "otp_verify_unknown_identifier",
                    "Verification against unknown identifier"
                );
                return Ok(VerificationOutcome::failed(VerifyStatus::Invalid));
            }
        };

        if user.is_blocked {
            return Err(AuthError::UserBlocked.into());
        }

        let record = match self.store.get(user.id, reason).await {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(VerificationOutcome::failed(VerifyStatus::Invalid)),
            Err(e) => {
                error!(
                    user_id = %user.id,
                    error = %e,
                    event = "otp_store_read_failed",
                    "Could not load challenge record"
                );
                return Ok(VerificationOutcome::failed(VerifyStatus::Error));
            }
        };

        if record.is_terminal() {
            return Ok(VerificationOutcome::failed(VerifyStatus::Invalid));
        }

        if record.is_expired(self.expiry()) {
            self.event_bus
                .publish(&AuthEvent::OtpExpired {
                    user_id: user.id,
                    reason,
                })
                .await;
            self.reissue_quietly(&user, reason).await;
            return Ok(VerificationOutcome::failed(VerifyStatus::Expired));
        }

        if record.failed_attempts >= self.config.max_failed_attempts {
            info!(
                user_id = %user.id,
                attempts = record.failed_attempts,
                event = "otp_attempts_exhausted",
                "Token retired after too many wrong guesses"
            );
            self.event_bus
                .publish(&AuthEvent::OtpFailed {
                    user_id: user.id,
                    reason,
                    attempts: record.failed_attempts,
                })
                .await;
            self.reissue_quietly(&user, reason).await;
            return Ok(VerificationOutcome::failed(VerifyStatus::MaxAttempts));
        }

        if record.matches(token) {
            let mut consumed = record;
            consumed.consume();
            self.store.save(consumed).await?;

            if reason.is_activation() && !user.is_active {
                let mut activated = user.clone();
                activated.activate();
                self.directory.save(activated).await?;
            }

            info!(
                user_id = %user.id,
                reason = ?reason,
                event = "otp_verified",
                "Token verified"
            );
            self.event_bus
                .publish(&AuthEvent::OtpVerified {
                    user_id: user.id,
                    reason,
                })
                .await;
            return Ok(VerificationOutcome::verified());
        }

        let mut failed = record;
        failed.register_failure();
        let attempts = failed.failed_attempts;
        let remaining = failed.remaining_attempts(self.config.max_failed_attempts);
        self.store.save(failed).await?;

        self.event_bus
            .publish(&AuthEvent::OtpFailed {
                user_id: user.id,
                reason,
                attempts,
            })
            .await;
        Ok(VerificationOutcome::incorrect(remaining))
    }

    /// Admits or rejects one verification request for the session.
    /// Returns an error while the session is locked out; blocks the
    /// account once the lockout count passes the threshold.
    pub async fn admit_verify_request(
        &self,
        session: &mut SessionLockout,
        user: &User,
    ) -> DomainResult<()> {
        match session.register_request(&self.config) {
            LockoutDecision::Proceed => Ok(()),
            LockoutDecision::LockedOut { seconds_remaining } => {
                warn!(
                    user_id = %user.id,
                    seconds_remaining,
                    event = "otp_session_locked",
                    "Verification request rejected during lockout"
                );
                Err(AuthError::SessionLockedOut { seconds_remaining }.into())
            }
            LockoutDecision::Blocked => {
                self.block_user(user).await?;
                Err(AuthError::UserBlocked.into())
            }
        }
    }

    /// Blocks the account, deactivates it, and retires every live
    /// challenge it holds
    pub async fn block_user(&self, user: &User) -> DomainResult<User> {
        let mut blocked = user.clone();
        blocked.block();
        let blocked = self.directory.save(blocked).await?;

        for reason in [
            OtpReason::EmailActivation,
            OtpReason::PhoneActivation,
            OtpReason::Login,
            OtpReason::ForgetPassword,
        ] {
            self.store.expire_active(user.id, reason).await?;
        }

        warn!(
            user_id = %user.id,
            event = "user_blocked",
            "Account blocked after repeated verification abuse"
        );
        self.event_bus
            .publish(&AuthEvent::UserBlocked { user_id: user.id })
            .await;
        Ok(blocked)
    }
}
