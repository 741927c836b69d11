//! # AuthKit Core
//!
//! Core business logic and domain layer for the pluggable authentication
//! backend. This crate contains domain entities, business services,
//! repository interfaces, and error types; storage and transport live in
//! separate crates behind the traits defined here.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
