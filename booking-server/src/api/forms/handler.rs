//! Form Registration Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::json_body;
use crate::core::ServerState;
use crate::db::repository::{BookingRepository, ContactRepository, HotelRepository, RepoError};
use crate::utils::{AppError, AppResult};
use shared::models::{
    Booking, BookingCreate, ContactCreate, ContactMessage, HotelReservation,
    HotelReservationCreate,
};

type Created<T> = (StatusCode, Json<T>);

/// 存储失败统一返回 "Error register user"
fn store_failed(resource: &'static str) -> impl FnOnce(RepoError) -> AppError {
    move |err| {
        tracing::error!(resource, error = %err, "Failed to store registration");
        AppError::registration_failed()
    }
}

/// POST /register - 登记旅行预订
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<BookingCreate>, JsonRejection>,
) -> AppResult<Created<Booking>> {
    let payload = json_body(payload)?;
    payload.validate()?;

    let booking = BookingRepository::new(state.get_db())
        .create(payload)
        .await
        .map_err(store_failed("booking"))?;

    tracing::info!(booking_id = %booking.id, destination = %booking.destination, "Booking registered");

    Ok((StatusCode::CREATED, Json(booking)))
}

/// POST /contact - 联系留言
pub async fn contact(
    State(state): State<ServerState>,
    payload: Result<Json<ContactCreate>, JsonRejection>,
) -> AppResult<Created<ContactMessage>> {
    let payload = json_body(payload)?;
    payload.validate()?;

    let message = ContactRepository::new(state.get_db())
        .create(payload)
        .await
        .map_err(store_failed("contact"))?;

    tracing::info!(contact_id = %message.id, "Contact message stored");

    Ok((StatusCode::CREATED, Json(message)))
}

/// POST /hotel - 酒店预订
pub async fn hotel(
    State(state): State<ServerState>,
    payload: Result<Json<HotelReservationCreate>, JsonRejection>,
) -> AppResult<Created<HotelReservation>> {
    let payload = json_body(payload)?;
    payload.validate()?;

    let reservation = HotelRepository::new(state.get_db())
        .create(payload)
        .await
        .map_err(store_failed("hotel"))?;

    tracing::info!(reservation_id = %reservation.id, hotel = %reservation.hotel_name, "Hotel reservation stored");

    Ok((StatusCode::CREATED, Json(reservation)))
}
