//! Coinfolio - 内存钱包与币种持仓服务
//!
//! 钱包余额始终由币种持仓推导：Σ amount * rate

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod error_body;
pub mod infrastructure;
pub mod metrics;
pub mod service;
pub mod utils;

// 重新导出常用类型
pub use app_state::AppState;
pub use error::{AppError, AppErrorCode};

pub mod prelude {
    pub use crate::{
        app_state::AppState,
        domain::{Coin, StoreError, Wallet, WalletStore},
        error::{AppError, AppErrorCode},
        service::WalletService,
    };
}
