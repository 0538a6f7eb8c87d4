//! HTTP request handlers for the mock server.

pub mod entities;
pub mod events;

pub use entities::*;
pub use events::*;
