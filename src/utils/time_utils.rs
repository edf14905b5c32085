//! 时间工具模块
//! 钱包 last_updated 字段使用分钟精度的本地时间，格式固定为 `YYYY-MM-DD HH:MM`

use chrono::{Local, NaiveDateTime, Timelike};

/// last_updated 的线上格式（无秒、无时区）
pub const LAST_UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// 截断到分钟精度
pub fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}

/// 当前本地时间（分钟精度）
pub fn current_minute() -> NaiveDateTime {
    truncate_to_minute(Local::now().naive_local())
}

/// 格式化为 `YYYY-MM-DD HH:MM`
pub fn format_last_updated(dt: &NaiveDateTime) -> String {
    dt.format(LAST_UPDATED_FORMAT).to_string()
}

/// serde 序列化适配：`#[serde(serialize_with = "crate::utils::time_utils::minute_format::serialize")]`
pub mod minute_format {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_last_updated(dt))
    }
}
