//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::api::json_body;
use crate::core::ServerState;
use crate::db::repository::BookingRepository;
use crate::utils::{AppError, AppResult};
use shared::models::{Booking, BookingStatusUpdate};

/// GET /bookings - 获取所有预订
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Booking>>> {
    let repo = BookingRepository::new(state.get_db());
    let bookings = repo.find_all().await?;
    Ok(Json(bookings))
}

/// GET /bookings/{id} - 获取单个预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Booking>> {
    let repo = BookingRepository::new(state.get_db());
    let booking = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::booking_not_found(&id))?;
    Ok(Json(booking))
}

/// PATCH /bookings/{id} - 更新预订状态
///
/// 重复取消直接返回当前记录，不再写库；已取消的预订不能恢复。
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<BookingStatusUpdate>, JsonRejection>,
) -> AppResult<Json<Booking>> {
    let update = json_body(payload)?;
    let repo = BookingRepository::new(state.get_db());

    let current = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::booking_not_found(&id))?;

    if current.status == update.status {
        return Ok(Json(current));
    }

    if !current.status.can_transition_to(update.status) {
        return Err(AppError::status_transition(format!(
            "Booking {} cannot move from {} to {}",
            id, current.status, update.status
        ))
        .with_detail("id", id.clone()));
    }

    let updated = repo.set_status(&id, update.status).await?;

    tracing::info!(booking_id = %id, status = %updated.status, "Booking status updated");

    Ok(Json(updated))
}
