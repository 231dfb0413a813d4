//! Booking Client - HTTP client and booking-management state for the travel booking server
//!
//! - [`HttpClient`]: reqwest-based transport
//! - [`BookingApi`]: the query-service contract the controller depends on
//! - [`BookingList`]: active/canceled partition, search, confirmation-gated cancel

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod http;
pub mod notify;
pub mod session;

pub use api::BookingApi;
pub use config::ClientConfig;
pub use controller::BookingList;
pub use error::{BookingError, ClientError, ClientResult};
pub use filter::filter_bookings;
pub use http::HttpClient;
pub use notify::{ConfirmPrompt, Notification, NotificationKind, Notifier};
pub use session::{FileSessionStore, SessionStore};

// Re-export shared types for convenience
pub use shared::models::{Booking, BookingStatus};
