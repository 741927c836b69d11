//! Types for authentication service results

use crate::domain::entities::user::User;
use crate::services::otp::ChallengeOutcome;

/// Result of a password login
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials valid, account active
    Success(User),
    /// Credentials valid but the account has not been activated; the
    /// caller should start a reactivation flow
    NeedsReactivation(User),
}

impl LoginOutcome {
    pub fn user(&self) -> &User {
        match self {
            LoginOutcome::Success(user) | LoginOutcome::NeedsReactivation(user) => user,
        }
    }
}

/// Result of a signup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupResult {
    /// The persisted account, inactive until verified
    pub user: User,
    /// The activation challenge, when token delivery is enabled
    pub challenge: Option<ChallengeOutcome>,
}
