//! Login attempt metrics module

mod service;


pub use service::LoginAttemptTracker;
