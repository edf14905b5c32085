//! HTTP Method Whitelist Middleware
//!
//! 阻止不安全或不必要的HTTP方法（如TRACE, CONNECT）

use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::AppError;

/// HTTP方法白名单中间件
///
/// 只允许 GET, POST, PUT, DELETE, OPTIONS；
/// 其余方法返回 405 JSON 错误体，应在其他中间件之前应用。
pub async fn method_whitelist_middleware(req: Request, next: Next) -> Response {
    let method = req.method();

    match method {
        &Method::GET | &Method::POST | &Method::PUT | &Method::DELETE | &Method::OPTIONS => {
            next.run(req).await
        }
        _ => {
            warn!("Blocked HTTP method: {} on path: {}", method, req.uri().path());
            AppError::method_not_allowed("Method not allowed.").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware::from_fn,
        routing::get,
        Router,
    };
    use tower::ServiceExt as _; // for oneshot()

    use super::*;

    async fn dummy_handler() -> &'static str {
        "OK"
    }

    fn app() -> Router {
        Router::new()
            .route("/test", get(dummy_handler))
            .layer(from_fn(method_whitelist_middleware))
    }

    #[tokio::test]
    async fn test_allowed_methods() {
        for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
            let req = Request::builder()
                .method(method.clone())
                .uri("/test")
                .body(Body::empty())
                .unwrap();

            let response = app().oneshot(req).await.unwrap();

            // GET会返回200，其他方法由路由返回405，但不会在中间件层被拒绝
            assert!(
                response.status() == StatusCode::OK
                    || response.status() == StatusCode::METHOD_NOT_ALLOWED,
                "Method {} should pass middleware",
                method
            );
        }
    }

    #[tokio::test]
    async fn test_blocked_methods() {
        for method_str in ["TRACE", "CONNECT", "PATCH"] {
            let req = Request::builder()
                .method(method_str)
                .uri("/test")
                .body(Body::empty())
                .unwrap();

            let response = app().oneshot(req).await.unwrap();

            assert_eq!(
                response.status(),
                StatusCode::METHOD_NOT_ALLOWED,
                "Method {} should be blocked",
                method_str
            );
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(v["error"], "method_not_allowed");
        }
    }
}
