use serde::Serialize;
use utoipa::ToSchema;

/// 错误响应文档（与 `AppError` 序列化结果一致）
#[derive(Serialize, ToSchema)]
pub struct ErrorBodyDoc {
    pub code: u16,
    pub error: String,
    pub message: String,
    pub trace_id: Option<String>,
}
