use std::{sync::Arc, time::Instant};

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::Level;
use utoipa::OpenApi;

use crate::{app_state::AppState, error::AppError};

pub mod coin_api;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod wallet_api;

pub use middleware::{method_whitelist_middleware, trace_id_middleware, TraceId};

#[derive(OpenApi)]
#[openapi(
    paths(
        wallet_api::create_wallet,
        wallet_api::list_wallets,
        wallet_api::rename_wallet,
        wallet_api::delete_wallet,
        coin_api::get_wallet_info,
        coin_api::add_coin,
        coin_api::update_coin,
        coin_api::remove_coin,
    ),
    components(schemas(
        crate::domain::Wallet,
        crate::domain::Coin,
        wallet_api::WalletNameReq,
        coin_api::CoinReq,
        response::WalletEnvelopeDoc,
        response::CoinEnvelopeDoc,
        response::WalletListEnvelopeDoc,
        crate::error_body::ErrorBodyDoc,
    )),
    tags(
        (name = "wallets", description = "Wallet lifecycle"),
        (name = "coins", description = "Coin holdings inside a wallet")
    )
)]
pub struct ApiDoc;

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/v1/wallets",
            post(wallet_api::create_wallet)
                .get(wallet_api::list_wallets)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/v1/wallets/:wname",
            get(coin_api::get_wallet_info)
                .put(wallet_api::rename_wallet)
                .delete(wallet_api::delete_wallet)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/v1/wallets/:wname/coins",
            post(coin_api::add_coin).fallback(method_not_allowed),
        )
        .route(
            "/api/v1/wallets/:wname/coins/:symbol",
            axum::routing::put(coin_api::update_coin)
                .delete(coin_api::remove_coin)
                .fallback(method_not_allowed),
        )
        .route("/healthz", get(healthz).fallback(method_not_allowed))
        .route("/metrics", get(metrics).fallback(method_not_allowed))
        .merge(utoipa_swagger_ui::SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(method_whitelist_middleware))
                .layer(from_fn(trace_id_middleware))
                .layer(CorsLayer::permissive())
                .layer(from_fn(add_response_time_header))
                .layer(from_fn(trace_log)),
        )
        .with_state(state)
}

async fn healthz(State(st): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "wallets": st.wallets.wallet_count().await,
    }))
}

async fn metrics(State(st): State<Arc<AppState>>) -> Response {
    crate::metrics::render_prometheus(st.wallets.wallet_count().await).into_response()
}

async fn not_found(req: Request) -> Response {
    with_request_trace_id(AppError::not_found("Not found."), &req).into_response()
}

/// 路径存在但不支持该方法（白名单内的方法也会走到这里）
async fn method_not_allowed(req: Request) -> Response {
    with_request_trace_id(AppError::method_not_allowed("Method not allowed."), &req)
        .into_response()
}

fn with_request_trace_id(err: AppError, req: &Request) -> AppError {
    match req.extensions().get::<TraceId>() {
        Some(trace_id) => err.with_trace_id(trace_id.as_str()),
        None => err,
    }
}

async fn add_response_time_header(req: Request, next: axum::middleware::Next) -> Response {
    let start = Instant::now();
    let mut resp = next.run(req).await;
    let elapsed_ms = start.elapsed().as_millis().to_string();
    resp.headers_mut().insert(
        "x-response-time",
        HeaderValue::from_str(&format!("{}ms", elapsed_ms))
            .unwrap_or(HeaderValue::from_static("0ms")),
    );
    resp
}

async fn trace_log(req: Request, next: axum::middleware::Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();
    let trace_id = req
        .extensions()
        .get::<TraceId>()
        .map(|t| t.as_str().to_string())
        .unwrap_or_else(|| "-".to_string());
    let resp = next.run(req).await;
    let status = resp.status();
    let elapsed = start.elapsed().as_millis();
    crate::metrics::observe_latency_ms(elapsed);
    tracing::event!(Level::INFO, trace_id=%trace_id, method=%method, path=%path, status=%status.as_u16(), elapsed_ms=%elapsed, "http_request");
    resp
}
