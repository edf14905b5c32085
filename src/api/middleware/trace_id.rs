//! Trace ID 中间件
//! 为每个请求生成唯一的 trace_id，用于日志与错误响应关联

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// 请求扩展中的 trace_id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(pub String);

impl TraceId {
    /// 生成新的 trace_id
    pub fn generate() -> Self {
        Self(format!("trace_{}", Uuid::new_v4().simple()))
    }

    /// 从请求头中提取 trace_id，如果没有则生成新的
    pub fn get_or_generate(req: &Request) -> Self {
        req.headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(|v| Self(v.to_string()))
            .unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 为每个请求生成或提取 trace_id，并添加到请求扩展和响应头中
pub async fn trace_id_middleware(mut req: Request, next: Next) -> Response {
    let trace_id = TraceId::get_or_generate(&req);

    req.extensions_mut().insert(trace_id.clone());

    let mut response = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(trace_id.as_str()) {
        response.headers_mut().insert(TRACE_ID_HEADER, header_value);
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, middleware::from_fn, routing::get, Extension, Router};
    use tower::ServiceExt as _;

    use super::*;

    async fn echo(Extension(trace_id): Extension<TraceId>) -> String {
        trace_id.0
    }

    fn app() -> Router {
        Router::new()
            .route("/t", get(echo))
            .layer(from_fn(trace_id_middleware))
    }

    #[tokio::test]
    async fn test_generates_trace_id() {
        let resp = app()
            .oneshot(axum::http::Request::get("/t").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let header = resp.headers().get(TRACE_ID_HEADER).unwrap().to_str().unwrap();
        assert!(header.starts_with("trace_"));
    }

    #[tokio::test]
    async fn test_keeps_incoming_trace_id() {
        let req = axum::http::Request::get("/t")
            .header(TRACE_ID_HEADER, "abc-123")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.headers().get(TRACE_ID_HEADER).unwrap(), "abc-123");

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"abc-123");
    }
}
