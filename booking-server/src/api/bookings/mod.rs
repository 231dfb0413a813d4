//! Booking API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /bookings | GET | 全部预订 (按创建时间) |
//! | /bookings/{id} | GET | 单个预订 |
//! | /bookings/{id} | PATCH | 更新状态 (仅 Active -> Canceled) |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/bookings", get(handler::list))
        .route(
            "/bookings/{id}",
            get(handler::get_by_id).patch(handler::update_status),
        )
}
