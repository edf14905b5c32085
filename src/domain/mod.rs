//! Domain 模块
//!
//! 钱包/币种数据模型与内存存储，所有不变量都在这里维护

pub mod error;
pub mod wallet;
pub mod wallet_store;

// 重新导出常用类型
pub use error::StoreError;
pub use wallet::{Coin, Wallet};
pub use wallet_store::{Clock, SystemClock, WalletStore};
