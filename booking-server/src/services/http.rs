use crate::core::ServerState;
use crate::middleware::logging_middleware;
use axum::error_handling::HandleErrorLayer;
use axum::{BoxError, Router, middleware};
use shared::error::{AppError, ErrorCode};
use std::time::Duration;
use tower::ServiceBuilder;
use tower::ServiceExt;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

pub type OneshotResult = Result<http::Response<axum::body::Body>, std::convert::Infallible>;

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::bookings::router())
        .merge(crate::api::forms::router())
}

/// Wrap `router` in the request deadline, CORS, compression and request logging
fn with_layers(router: Router, timeout: Duration) -> Router {
    router
        // Tower HTTP 中间件
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_layer_error))
                .layer(TimeoutLayer::new(timeout)),
        )
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // HTTP 请求日志中间件
        .layer(middleware::from_fn(logging_middleware))
}

/// Errors raised by the tower layers, rendered as the unified error body
async fn handle_layer_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::new(ErrorCode::TimeoutError)
    } else {
        AppError::internal(err.to_string())
    }
}

/// HTTP service: the fully layered router bound to a [`ServerState`]
#[derive(Clone)]
pub struct HttpService {
    router: Router,
}

impl HttpService {
    pub fn new(state: ServerState) -> Self {
        let timeout = Duration::from_millis(state.config.request_timeout_ms);
        let router = with_layers(build_app().with_state(state), timeout);
        Self { router }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// In-process request through the router, no socket involved
    pub async fn oneshot(&self, request: http::Request<axum::body::Body>) -> OneshotResult {
        self.router.clone().oneshot(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::routing::get;
    use http::{Request, StatusCode};
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_slow_request_times_out_with_error_body() {
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                "done"
            }),
        );
        let app = with_layers(slow, Duration::from_millis(10));

        let response = app
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], 9004);
        assert_eq!(body["message"], "Request timed out");
    }
}
