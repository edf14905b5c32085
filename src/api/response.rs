//! 统一 API 响应格式
//!
//! 成功响应把业务数据字段平铺，并附带 `code`（HTTP 状态码）与 `message`：
//! `{ "name": ..., "balance": ..., "code": 200, "message": "..." }`

use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    api::middleware::TraceId,
    domain::{Coin, Wallet},
    error::AppError,
};

/// 统一成功响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    #[serde(flatten)]
    pub data: T,
    pub code: u16,
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应（带自定义消息）
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            code: StatusCode::OK.as_u16(),
            message: message.into(),
        }
    }
}

/// 辅助函数：将数据包装为统一响应格式
pub fn success_response<T: Serialize>(
    data: T,
    message: &str,
) -> Result<Json<ApiResponse<T>>, AppError> {
    Ok(Json(ApiResponse::success_with_message(data, message)))
}

/// 文档用：钱包响应（平铺的钱包字段 + code/message）
#[derive(Serialize, ToSchema)]
pub struct WalletEnvelopeDoc {
    pub name: String,
    pub balance: f64,
    pub coins: Vec<Coin>,
    #[schema(example = "2024-03-07 09:05")]
    pub last_updated: String,
    #[schema(example = 200)]
    pub code: u16,
    pub message: String,
}

/// 文档用：币种响应
#[derive(Serialize, ToSchema)]
pub struct CoinEnvelopeDoc {
    pub name: String,
    pub symbol: String,
    pub amount: f64,
    pub rate: f64,
    #[schema(example = 200)]
    pub code: u16,
    pub message: String,
}

/// 文档用：钱包列表响应
#[derive(Serialize, ToSchema)]
pub struct WalletListEnvelopeDoc {
    pub size: usize,
    pub wallets: Vec<Wallet>,
    #[schema(example = 200)]
    pub code: u16,
    pub message: String,
}

/// 处理结束：记录端点指标，并给错误附上 trace_id
pub fn respond<T>(
    endpoint: &'static str,
    trace_id: &TraceId,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    crate::metrics::observe(endpoint, &result);
    result.map_err(|e| e.with_trace_id(trace_id.as_str()))
}
