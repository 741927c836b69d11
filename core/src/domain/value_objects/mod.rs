//! Value objects representing immutable domain concepts.

pub mod identity;
pub mod signup;

// Re-export commonly used types
pub use identity::IdentityPolicy;
pub use signup::SignupData;
