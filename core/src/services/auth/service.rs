//! Authentication service implementation.
//!
//! Covers signup through the resolved strategy set, password login with
//! attempt events, and the reactivation flow for accounts that were
//! created but never verified.

use std::sync::Arc;

use tracing::{debug, info, warn};

use authkit_shared::config::AuthSettings;
use authkit_shared::validators::canonicalize_identifier;

use crate::domain::entities::otp::OtpReason;
use crate::domain::entities::user::User;
use crate::domain::events::{AuthEvent, EventBus};
use crate::domain::value_objects::SignupData;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{OtpStore, UserDirectory};
use crate::services::otp::{ChallengeOutcome, NotificationGateway, OtpVerificationService};
use crate::services::strategy::StrategyResolver;

use super::types::{LoginOutcome, SignupResult};

/// Service for signup, login, and reactivation
pub struct AuthenticationService<D, N, S>
where
    D: UserDirectory,
    N: NotificationGateway,
    S: OtpStore,
{
    directory: Arc<D>,
    gateway: Arc<N>,
    resolver: StrategyResolver<D>,
    otp_service: Arc<OtpVerificationService<D, N, S>>,
    event_bus: Arc<EventBus>,
    settings: AuthSettings,
}

impl<D, N, S> AuthenticationService<D, N, S>
where
    D: UserDirectory + 'static,
    N: NotificationGateway,
    S: OtpStore,
{
    pub fn new(
        directory: Arc<D>,
        gateway: Arc<N>,
        otp_service: Arc<OtpVerificationService<D, N, S>>,
        event_bus: Arc<EventBus>,
        settings: AuthSettings,
    ) -> Self {
        let resolver = StrategyResolver::new(directory.clone(), settings.email_domains.clone());
        Self {
            directory,
            gateway,
            resolver,
            otp_service,
            event_bus,
            settings,
        }
    }

    /// The activation reason matching the user's contact field
    fn activation_reason(user: &User) -> OtpReason {
        if user.email.is_some() {
            OtpReason::EmailActivation
        } else {
            OtpReason::PhoneActivation
        }
    }

    /// Creates an inactive account through the strategies for the enabled
    /// methods, then starts the activation flow when token delivery is
    /// on.
    pub async fn signup(&self, data: &SignupData) -> DomainResult<SignupResult> {
        let strategy = self.resolver.select(data, &self.settings.methods)?;
        let user = strategy.create_user(data).await?;

        info!(
            user_id = %user.id,
            event = "user_signed_up",
            "Account created, pending activation"
        );

        let challenge = if self.settings.send_otp {
            Some(self.request_reactivation(&user).await?)
        } else {
            None
        };

        Ok(SignupResult { user, challenge })
    }

    /// Verifies a password against the account the identifier resolves
    /// to. Every attempt, successful or not, is published as a
    /// [`AuthEvent::LoginAttempt`].
    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<LoginOutcome> {
        let (field, identifier) = canonicalize_identifier(identifier);
        let identifier = identifier.as_str();
        let user = match self.directory.find_by_identifier(field, identifier).await? {
            Some(user) => user,
            None => {
                debug!(
                    field = field.as_str(),
                    event = "login_unknown_identifier",
                    "Login against unknown identifier"
                );
                self.publish_attempt(None, identifier, false, false).await;
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if user.is_blocked {
            warn!(user_id = %user.id, event = "login_blocked_user", "Blocked account attempted login");
            self.publish_attempt(Some(&user), identifier, false, false)
                .await;
            return Err(AuthError::UserBlocked.into());
        }

        if !user.check_password(password) {
            self.publish_attempt(Some(&user), identifier, false, false)
                .await;
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active {
            // correct password but never activated; not counted as a
            // successful login
            self.publish_attempt(Some(&user), identifier, false, false)
                .await;
            return Ok(LoginOutcome::NeedsReactivation(user));
        }

        info!(user_id = %user.id, event = "login_succeeded", "Login succeeded");
        self.publish_attempt(Some(&user), identifier, true, user.is_admin())
            .await;
        Ok(LoginOutcome::Success(user))
    }

    /// Issues an activation token for an inactive account
    pub async fn request_reactivation(&self, user: &User) -> DomainResult<ChallengeOutcome> {
        if user.is_blocked {
            return Err(AuthError::UserBlocked.into());
        }
        self.otp_service
            .issue_challenge(user, Self::activation_reason(user))
            .await
    }

    /// Emails an activation link instead of a token. Only available when
    /// the deployment enables link activation, which requires the email
    /// method.
    pub async fn send_activation_link(&self, user: &User, link: &str) -> DomainResult<String> {
        if user.is_blocked {
            return Err(AuthError::UserBlocked.into());
        }
        let email = user
            .email
            .as_deref()
            .ok_or(AuthError::NoContactAddress)?;
        self.gateway.send_activation_link(email, link).await?;
        info!(
            user_id = %user.id,
            event = "activation_link_sent",
            "Activation link dispatched"
        );
        Ok(email.to_string())
    }

    async fn publish_attempt(
        &self,
        user: Option<&User>,
        identifier: &str,
        success: bool,
        is_admin: bool,
    ) {
        self.event_bus
            .publish(&AuthEvent::LoginAttempt {
                user_id: user.map(|u| u.id),
                identifier: identifier.to_string(),
                success,
                is_admin,
            })
            .await;
    }
}
