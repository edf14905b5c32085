//! 钱包存储错误类型

use thiserror::Error;

/// WalletStore 操作失败的原因
///
/// 所有校验都先于修改执行，返回错误时存储保持不变。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("wallet `{0}` not found")]
    WalletNotFound(String),

    #[error("coin `{symbol}` is not in wallet `{wallet}`")]
    CoinNotFound { wallet: String, symbol: String },

    #[error("wallet name `{0}` already exists")]
    DuplicateName(String),

    #[error("coin `{name}` / `{symbol}` is duplicate in wallet `{wallet}`")]
    DuplicateCoin {
        wallet: String,
        name: String,
        symbol: String,
    },

    #[error("coin `{symbol}` would make the balance of wallet `{wallet}` non-finite")]
    BalanceOverflow { wallet: String, symbol: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::WalletNotFound(_) | Self::CoinNotFound { .. })
    }
}
