use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppErrorCode {
    // HTTP 基础错误码
    InvalidInput,
    NotFound,
    MethodNotAllowed,
    Internal,

    // 业务错误码
    WalletNotFound,
    CoinNotFound,
    WalletAlreadyExists,
    DuplicateCoin,
}

impl AppErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppErrorCode::InvalidInput => "invalid_input",
            AppErrorCode::NotFound => "not_found",
            AppErrorCode::MethodNotAllowed => "method_not_allowed",
            AppErrorCode::Internal => "internal",
            AppErrorCode::WalletNotFound => "wallet_not_found",
            AppErrorCode::CoinNotFound => "coin_not_found",
            AppErrorCode::WalletAlreadyExists => "wallet_already_exists",
            AppErrorCode::DuplicateCoin => "duplicate_coin",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppError {
    pub code: AppErrorCode,
    pub message: String,
    pub status: StatusCode,
    pub trace_id: Option<String>,
}

/// 错误响应：`code` 为 HTTP 状态码数字（与旧客户端兼容），`error` 为业务错误码
#[derive(Serialize)]
struct ErrorBody<'a> {
    code: u16,
    error: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<&'a str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.status.as_u16(),
            error: self.code.as_str(),
            message: &self.message,
            trace_id: self.trace_id.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    fn new(code: AppErrorCode, status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            code,
            message: msg.into(),
            status,
            trace_id: None,
        }
    }

    /// 请求体无法解析或字段不合法
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(AppErrorCode::InvalidInput, StatusCode::BAD_REQUEST, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(AppErrorCode::NotFound, StatusCode::NOT_FOUND, msg)
    }

    pub fn method_not_allowed(msg: impl Into<String>) -> Self {
        Self::new(
            AppErrorCode::MethodNotAllowed,
            StatusCode::METHOD_NOT_ALLOWED,
            msg,
        )
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(
            AppErrorCode::Internal,
            StatusCode::INTERNAL_SERVER_ERROR,
            msg,
        )
    }

    // 业务错误辅助函数
    pub fn wallet_not_found(msg: impl Into<String>) -> Self {
        Self::new(AppErrorCode::WalletNotFound, StatusCode::NOT_FOUND, msg)
    }

    pub fn coin_not_found(msg: impl Into<String>) -> Self {
        Self::new(AppErrorCode::CoinNotFound, StatusCode::NOT_FOUND, msg)
    }

    /// 重复冲突沿用 406 Not Acceptable
    pub fn wallet_already_exists(msg: impl Into<String>) -> Self {
        Self::new(
            AppErrorCode::WalletAlreadyExists,
            StatusCode::NOT_ACCEPTABLE,
            msg,
        )
    }

    pub fn duplicate_coin(msg: impl Into<String>) -> Self {
        Self::new(AppErrorCode::DuplicateCoin, StatusCode::NOT_ACCEPTABLE, msg)
    }

    /// 设置追踪ID
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

// 从存储错误转换
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::WalletNotFound(_) => Self::wallet_not_found("Not found."),
            StoreError::CoinNotFound { .. } => Self::coin_not_found("Coin is not in this wallet!"),
            StoreError::DuplicateName(_) => {
                Self::wallet_already_exists("New wallet name is duplicate!")
            }
            StoreError::DuplicateCoin { .. } => Self::duplicate_coin("duplicate coin in wallet!"),
            StoreError::BalanceOverflow { .. } => {
                Self::invalid_input("Invalid Types. wallet balance must stay a finite number")
            }
        }
    }
}

// 从 JSON 提取失败转换
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_input(format!("Invalid Types. {}", rejection.body_text()))
    }
}

// 从 serde_json 错误转换
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_input(format!("Invalid Types. {}", err))
    }
}

// 从 anyhow 错误转换
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(format!("{}", err))
    }
}
