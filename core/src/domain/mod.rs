//! Domain layer containing business entities, value objects, and domain events.

pub mod entities;
pub mod events;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::*;
pub use events::*;
pub use value_objects::*;
