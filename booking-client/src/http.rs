//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::ApiResponse;
use shared::models::{
    Booking, BookingCreate, BookingStatus, BookingStatusUpdate, ContactCreate, ContactMessage,
    HotelReservation, HotelReservationCreate,
};

/// HTTP client for making network requests to the booking server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        let body = Self::handle_response(response).await?;
        Self::decode(&body)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let body = Self::handle_response(response).await?;
        Self::decode(&body)
    }

    /// Make a PATCH request with JSON body
    ///
    /// An empty 2xx body yields `None`.
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<T>> {
        let response = self.client.patch(self.url(path)).json(body).send().await?;
        let body = Self::handle_response(response).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Self::decode(&body).map(Some)
    }

    /// Status check; returns the raw 2xx body
    async fn handle_response(response: reqwest::Response) -> ClientResult<Vec<u8>> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            // Error bodies follow ApiResponse; fall back to the raw text otherwise
            let (code, message) = match serde_json::from_slice::<ApiResponse<()>>(&bytes) {
                Ok(body) => (body.code, body.message),
                Err(_) => (None, String::from_utf8_lossy(&bytes).into_owned()),
            };
            return match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                _ => Err(ClientError::Status {
                    status: status.as_u16(),
                    code,
                    message,
                }),
            };
        }

        Ok(bytes.to_vec())
    }

    fn decode<T: DeserializeOwned>(body: &[u8]) -> ClientResult<T> {
        serde_json::from_slice(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    // ========== Booking API ==========

    /// GET /bookings
    pub async fn list_bookings(&self) -> ClientResult<Vec<Booking>> {
        self.get("/bookings").await
    }

    /// GET /bookings/{id}
    pub async fn get_booking(&self, id: &str) -> ClientResult<Booking> {
        self.get(&format!("/bookings/{}", id)).await
    }

    /// PATCH /bookings/{id}
    pub async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> ClientResult<Option<Booking>> {
        self.patch(&format!("/bookings/{}", id), &BookingStatusUpdate { status })
            .await
    }

    // ========== Registration API ==========

    /// POST /register
    pub async fn register_booking(&self, booking: &BookingCreate) -> ClientResult<Booking> {
        self.post("/register", booking).await
    }

    /// POST /contact
    pub async fn submit_contact(&self, contact: &ContactCreate) -> ClientResult<ContactMessage> {
        self.post("/contact", contact).await
    }

    /// POST /hotel
    pub async fn book_hotel(
        &self,
        reservation: &HotelReservationCreate,
    ) -> ClientResult<HotelReservation> {
        self.post("/hotel", reservation).await
    }
}
