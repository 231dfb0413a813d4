//! 请求日志中间件
//!
//! 每个请求在一个 `request` span 中执行，span 记录请求 ID、路由模板和
//! 所操作的预订 ID；处理器内部的日志因此自动带上这些字段。

use axum::{
    extract::{MatchedPath, Request},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 请求日志中间件
///
/// - 沿用客户端提供的 `x-request-id`，缺失时生成，并写回响应头
/// - 路由模板 (如 `/bookings/{id}`) 作为 `route`，预订 ID 单独记录
/// - 5xx 与 4xx 以 warn 记录，其余以 info 记录
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let booking_id = booking_id(req.uri().path()).unwrap_or("-").to_string();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        route = %route,
        booking_id = %booking_id,
    );

    let mut response = next.run(req).instrument(span.clone()).await;

    let latency_ms = start.elapsed().as_millis();
    let status = response.status();
    span.in_scope(|| log_outcome(status, latency_ms));

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn log_outcome(status: StatusCode, latency_ms: u128) {
    let status_code = status.as_u16();
    match status {
        s if s.is_server_error() => {
            warn!(status = status_code, latency_ms = %latency_ms, "Booking request failed")
        }
        s if s.is_client_error() => {
            warn!(status = status_code, latency_ms = %latency_ms, "Booking request rejected")
        }
        _ => info!(status = status_code, latency_ms = %latency_ms, "Booking request served"),
    }
}

/// The `{id}` segment of `/bookings/{id}`
fn booking_id(path: &str) -> Option<&str> {
    let id = path.strip_prefix("/bookings/")?.trim_end_matches('/');
    (!id.is_empty() && !id.contains('/')).then_some(id)
}
