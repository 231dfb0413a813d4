//! Booking query service contract

use async_trait::async_trait;
use shared::models::{Booking, BookingStatus};

use crate::{ClientResult, HttpClient};

/// Server operations the booking list depends on
///
/// `update_booking_status` resolves to `None` when the server acknowledges
/// the update without echoing the record.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn list_bookings(&self) -> ClientResult<Vec<Booking>>;

    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> ClientResult<Option<Booking>>;
}

#[async_trait]
impl BookingApi for HttpClient {
    async fn list_bookings(&self) -> ClientResult<Vec<Booking>> {
        HttpClient::list_bookings(self).await
    }

    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> ClientResult<Option<Booking>> {
        HttpClient::update_booking_status(self, id, status).await
    }
}
