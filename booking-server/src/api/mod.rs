//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`bookings`] - 预订查询与状态更新
//! - [`forms`] - 表单登记 (预订 / 联系 / 酒店)

pub mod bookings;
pub mod forms;
pub mod health;

use axum::Json;
use axum::extract::rejection::JsonRejection;

use crate::utils::{AppError, AppResult};

/// Unwrap a JSON body extractor, mapping rejections onto the unified error body
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::validation(rejection.body_text()))
}
