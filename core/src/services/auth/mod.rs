//! Authentication module covering signup, login, and reactivation

mod service;
mod types;


pub use service::AuthenticationService;
pub use types::{LoginOutcome, SignupResult};
