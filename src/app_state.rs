use std::sync::Arc;

use crate::{config::Config, domain::WalletStore, service::WalletService};

/// 应用状态
/// 包含所有共享资源
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub wallets: WalletService,
}

impl AppState {
    /// 创建新的应用状态（空存储，系统时钟）
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_store(config, WalletStore::new())
    }

    /// 使用指定存储创建，测试中用于注入固定时钟
    pub fn with_store(config: Arc<Config>, store: WalletStore) -> Self {
        Self {
            config,
            wallets: WalletService::new(store),
        }
    }
}
