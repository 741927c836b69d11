//! Integration tests for the full signup, activation, and login flow
//! over the in-memory implementations.

use std::sync::Arc;

use authkit_core::domain::entities::otp::OtpReason;
use authkit_core::domain::events::EventBus;
use authkit_core::domain::value_objects::SignupData;
use authkit_core::errors::{AuthError, DomainError};
use authkit_core::repositories::{
    InMemoryLoginAttemptRepository, InMemoryOtpStore, InMemoryUserDirectory, UserDirectory,
};
use authkit_core::services::auth::{AuthenticationService, LoginOutcome};
use authkit_core::services::metrics::LoginAttemptTracker;
use authkit_core::services::otp::{
    MockNotificationGateway, OtpServiceConfig, OtpVerificationService, SessionLockout,
};
use authkit_shared::config::{AuthSettings, IdentityConfiguration, OtpConfig};

struct App {
    directory: Arc<InMemoryUserDirectory>,
    gateway: Arc<MockNotificationGateway>,
    attempts: Arc<InMemoryLoginAttemptRepository>,
    otp: Arc<
        OtpVerificationService<InMemoryUserDirectory, MockNotificationGateway, InMemoryOtpStore>,
    >,
    auth: AuthenticationService<InMemoryUserDirectory, MockNotificationGateway, InMemoryOtpStore>,
    tracker: Arc<LoginAttemptTracker<InMemoryLoginAttemptRepository>>,
}

fn build_app(settings: AuthSettings) -> App {
    let directory = Arc::new(InMemoryUserDirectory::new());
    let gateway = Arc::new(MockNotificationGateway::new());
    let store = Arc::new(InMemoryOtpStore::new());
    let attempts = Arc::new(InMemoryLoginAttemptRepository::new());
    let tracker = Arc::new(LoginAttemptTracker::new(attempts.clone()));

    let mut bus = EventBus::new();
    bus.subscribe(tracker.clone());
    let bus = Arc::new(bus);

    let otp = Arc::new(OtpVerificationService::new(
        directory.clone(),
        gateway.clone(),
        store,
        bus.clone(),
        OtpServiceConfig::from(&settings.otp),
    ));
    let auth = AuthenticationService::new(
        directory.clone(),
        gateway.clone(),
        otp.clone(),
        bus,
        settings,
    );

    App {
        directory,
        gateway,
        attempts,
        otp,
        auth,
        tracker,
    }
}

fn default_settings() -> AuthSettings {
    AuthSettings {
        methods: IdentityConfiguration::new(true, true, false),
        otp: OtpConfig::default(),
        email_domains: None,
        send_otp: true,
        activation_link_enabled: false,
    }
}

#[tokio::test]
async fn test_signup_activate_login_flow() {
    let app = build_app(default_settings());

    let data = SignupData::new()
        .with_email("alice@example.com")
        .with_phone_number("09123456789")
        .with_password("hunter22");

    let result = app.auth.signup(&data).await.unwrap();
    assert!(!result.user.is_active);
    assert_eq!(result.user.phone_number.as_deref(), Some("+989123456789"));

    // before activation a correct login is turned into a reactivation
    let outcome = app
        .auth
        .login("alice@example.com", "hunter22")
        .await
        .unwrap();
    assert!(matches!(outcome, LoginOutcome::NeedsReactivation(_)));

    // verify the activation token that signup sent
    let token = app.gateway.last_body().await.unwrap();
    let verification = app
        .otp
        .verify("alice@example.com", OtpReason::EmailActivation, &token)
        .await
        .unwrap();
    assert!(verification.success);

    let outcome = app
        .auth
        .login("alice@example.com", "hunter22")
        .await
        .unwrap();
    assert!(matches!(outcome, LoginOutcome::Success(_)));

    // any accepted phone spelling routes to the same account
    let outcome = app.auth.login("+989123456789", "hunter22").await.unwrap();
    assert!(matches!(outcome, LoginOutcome::Success(_)));
    let outcome = app.auth.login("09123456789", "hunter22").await.unwrap();
    assert!(matches!(outcome, LoginOutcome::Success(_)));
}

#[tokio::test]
async fn test_login_events_feed_the_tracker() {
    let app = build_app(default_settings());

    let data = SignupData::new()
        .with_email("alice@example.com")
        .with_phone_number("09123456789")
        .with_password("hunter22");
    let user = app.auth.signup(&data).await.unwrap().user;

    let mut activated = user;
    activated.activate();
    app.directory.save(activated).await.unwrap();

    app.auth
        .login("alice@example.com", "hunter22")
        .await
        .unwrap();
    let _ = app.auth.login("alice@example.com", "wrong").await;
    let _ = app.auth.login("ghost@example.com", "wrong").await;

    assert_eq!(app.attempts.len().await, 3);
    let totals = app.tracker.daily_metrics().await.unwrap();
    assert_eq!(totals.total_logins, 1);
    assert_eq!(totals.failed_attempts, 2);
}

#[tokio::test]
async fn test_session_abuse_ends_in_account_block() {
    let mut settings = default_settings();
    settings.otp = OtpConfig {
        max_verify_requests: 2,
        block_threshold: 1,
        ..OtpConfig::default()
    };
    let app = build_app(settings);

    let data = SignupData::new()
        .with_email("mallory@example.com")
        .with_phone_number("09123456780")
        .with_password("hunter22");
    let user = app.auth.signup(&data).await.unwrap().user;

    let mut session = SessionLockout::new();
    app.otp
        .admit_verify_request(&mut session, &user)
        .await
        .unwrap();

    // block_threshold 1 escalates the very first lockout to a block
    let err = app
        .otp
        .admit_verify_request(&mut session, &user)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserBlocked)));

    let err = app
        .auth
        .login("mallory@example.com", "hunter22")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserBlocked)));

    // blocked accounts cannot run the verification flow either
    let err = app
        .otp
        .verify("mallory@example.com", OtpReason::EmailActivation, "123456")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserBlocked)));
}
