//! 测试辅助模块
//! 提供固定时钟的测试应用与请求辅助函数

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use coinfolio::{api, app_state::AppState, config::Config, domain::Clock, domain::WalletStore};
use serde_json::Value;
use tower::ServiceExt as _;

/// 测试中 last_updated 的固定值
pub const FIXED_TIME: &str = "2024-01-02 03:04";

#[derive(Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|d| d.and_hms_opt(3, 4, 0))
        .expect("valid fixed time")
}

/// 创建测试应用（空存储 + 固定时钟）
pub fn create_test_app() -> Router {
    let store = WalletStore::with_clock(Arc::new(FixedClock(fixed_time())));
    let state = Arc::new(AppState::with_store(Arc::new(Config::default()), store));
    api::routes(state)
}

/// 发送请求，返回状态码与 JSON 响应体（非 JSON 时为 Value::Null）
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// 发送原始请求体（用于非法 JSON 等场景）
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub async fn create_wallet(app: &Router, name: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/v1/wallets",
        Some(serde_json::json!({ "name": name })),
    )
    .await
}

pub async fn add_coin(
    app: &Router,
    wallet: &str,
    name: &str,
    symbol: &str,
    amount: f64,
    rate: f64,
) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        &format!("/api/v1/wallets/{}/coins", wallet),
        Some(serde_json::json!({
            "name": name,
            "symbol": symbol,
            "amount": amount,
            "rate": rate,
        })),
    )
    .await
}
