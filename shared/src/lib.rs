//! Shared types for the travel booking service
//!
//! Wire models, error codes and the error body used by both
//! `booking-server` and `booking-client`.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use models::{Booking, BookingCreate, BookingStatus, BookingStatusUpdate};
