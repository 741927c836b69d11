//! Configuration module
//!
//! - `methods` - which authentication methods are enabled
//! - `otp` - OTP expiry and lockout thresholds

pub mod methods;
pub mod otp;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use methods::{AuthMethod, IdentifierField, IdentityConfiguration};
pub use otp::OtpConfig;

/// A problem detected by [`AuthSettings::validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsIssue {
    #[error("no authentication method is enabled")]
    NoMethodEnabled,

    #[error("activation links require the email method to be enabled")]
    ActivationLinkRequiresEmail,

    #[error("send_otp and activation_link_enabled cannot both be set")]
    ConflictingDeliveryModes,
}

/// Complete authentication configuration for a deployment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Enabled authentication methods
    pub methods: IdentityConfiguration,

    /// OTP lifecycle thresholds
    #[serde(default)]
    pub otp: OtpConfig,

    /// Optional allow-list of email domains for registration
    #[serde(default)]
    pub email_domains: Option<Vec<String>>,

    /// Deliver activation challenges as OTP codes
    #[serde(default)]
    pub send_otp: bool,

    /// Deliver activation challenges as emailed links
    #[serde(default)]
    pub activation_link_enabled: bool,
}

impl AuthSettings {
    /// Load the whole surface from environment variables
    pub fn from_env() -> Self {
        Self {
            methods: IdentityConfiguration::from_env(),
            otp: OtpConfig::from_env(),
            email_domains: std::env::var("COMPANY_EMAIL_DOMAINS")
                .ok()
                .map(|v| v.split(',').map(|d| d.trim().to_string()).collect()),
            send_otp: env_flag("SEND_OTP"),
            activation_link_enabled: env_flag("ACTIVATION_LINK_ENABLED"),
        }
    }

    /// Startup-time sanity checks. Returns every issue found rather than
    /// stopping at the first, so a deployment log shows the full picture.
    pub fn validate(&self) -> Vec<SettingsIssue> {
        let mut issues = Vec::new();

        if !self.methods.any_enabled() {
            issues.push(SettingsIssue::NoMethodEnabled);
        }
        if self.activation_link_enabled && !self.methods.email_password {
            issues.push(SettingsIssue::ActivationLinkRequiresEmail);
        }
        if self.send_otp && self.activation_link_enabled {
            issues.push(SettingsIssue::ConflictingDeliveryModes);
        }

        issues
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim(), "1" | "true" | "True" | "TRUE"))
        .unwrap_or(false)
}
