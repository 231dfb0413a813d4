//! Data models
//!
//! Shared between booking-server and its clients (via API).
//! Wire names are camelCase, matching the form payloads.

pub mod booking;
pub mod contact;
pub mod hotel;

// Re-exports
pub use booking::*;
pub use contact::*;
pub use hotel::*;
