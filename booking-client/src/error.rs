//! Client error types

use thiserror::Error;

/// Transport-level error
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Request failed with status {status}: {message}")]
    Status {
        status: u16,
        /// Server error code, when the body carried one
        code: Option<u16>,
        message: String,
    },

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Booking workflow failure, surfaced to the user as a notification
#[derive(Debug, Error)]
pub enum BookingError {
    /// Listing bookings failed
    #[error("Failed to load bookings: {0}")]
    Fetch(#[source] ClientError),

    /// Status update failed
    #[error("Failed to cancel booking: {0}")]
    Update(#[source] ClientError),
}
