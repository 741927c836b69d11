//! Signup strategy module covering account creation per identifier field
//!
//! Each enabled authentication method contributes one strategy; the
//! resolver composes them so a deployment with several methods creates a
//! single account carrying every required identifier.

mod combined;
mod email;
mod phone;
mod resolver;
mod traits;
mod username;


pub use combined::CombinedStrategy;
pub use email::EmailStrategy;
pub use phone::PhoneStrategy;
pub use resolver::StrategyResolver;
pub use traits::AuthStrategy;
pub use username::UsernameStrategy;
