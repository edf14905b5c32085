//! 钱包服务
//!
//! 持有唯一的 [`WalletStore`]，用一把 `RwLock` 串行化所有读写：
//! 写操作在同一把写锁内完成“校验 + 修改”，保证名称唯一性检查看到的是完整存储。

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Coin, StoreError, Wallet, WalletStore};

#[derive(Debug, Clone)]
pub struct WalletService {
    store: Arc<RwLock<WalletStore>>,
}

impl Default for WalletService {
    fn default() -> Self {
        Self::new(WalletStore::new())
    }
}

impl WalletService {
    pub fn new(store: WalletStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn create_wallet(&self, name: &str) -> Result<Wallet, StoreError> {
        let result = self.store.write().await.create(name);
        traced("create_wallet", name, None, result)
    }

    /// 全部钱包快照（插入顺序）
    pub async fn list_wallets(&self) -> Vec<Wallet> {
        self.store.read().await.list().to_vec()
    }

    pub async fn wallet_count(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn get_wallet(&self, name: &str) -> Result<Wallet, StoreError> {
        self.store.read().await.get(name).cloned()
    }

    pub async fn rename_wallet(&self, old_name: &str, new_name: &str) -> Result<Wallet, StoreError> {
        let result = self.store.write().await.rename(old_name, new_name);
        traced("rename_wallet", old_name, Some(new_name), result)
    }

    pub async fn delete_wallet(&self, name: &str) -> Result<Wallet, StoreError> {
        let result = self.store.write().await.delete(name);
        traced("delete_wallet", name, None, result)
    }

    pub async fn add_coin(&self, wallet_name: &str, coin: Coin) -> Result<Coin, StoreError> {
        let symbol = coin.symbol.clone();
        let result = self.store.write().await.add_coin(wallet_name, coin);
        traced("add_coin", wallet_name, Some(&symbol), result)
    }

    pub async fn update_coin(
        &self,
        wallet_name: &str,
        symbol: &str,
        coin: Coin,
    ) -> Result<Coin, StoreError> {
        let result = self
            .store
            .write()
            .await
            .update_coin(wallet_name, symbol, coin);
        traced("update_coin", wallet_name, Some(symbol), result)
    }

    pub async fn remove_coin(&self, wallet_name: &str, symbol: &str) -> Result<Coin, StoreError> {
        let result = self.store.write().await.remove_coin(wallet_name, symbol);
        traced("remove_coin", wallet_name, Some(symbol), result)
    }
}

/// 统一记录修改结果：成功 info，拒绝 warn
/// `target` 为币种代码或重命名后的名称
fn traced<T>(
    op: &'static str,
    wallet: &str,
    target: Option<&str>,
    result: Result<T, StoreError>,
) -> Result<T, StoreError> {
    let target = target.unwrap_or("-");
    match &result {
        Ok(_) => tracing::info!(op, wallet = %wallet, target = %target, "wallet store updated"),
        Err(e) => {
            tracing::warn!(op, wallet = %wallet, target = %target, error = %e, "wallet store rejected")
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_create_same_name() {
        let service = WalletService::default();

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let svc = service.clone();
                tokio::spawn(async move { svc.create_wallet("alice").await })
            })
            .collect();

        let mut ok = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(e) => assert_eq!(e, StoreError::DuplicateName("alice".into())),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(service.wallet_count().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_add_coins_keeps_balance() {
        let service = WalletService::default();
        service.create_wallet("w").await.unwrap();

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let svc = service.clone();
                tokio::spawn(async move {
                    svc.add_coin("w", Coin::new(format!("C{i}"), format!("S{i}"), 1.0, 2.0))
                        .await
                })
            })
            .collect();
        for h in handles {
            h.await.unwrap().unwrap();
        }

        let w = service.get_wallet("w").await.unwrap();
        assert_eq!(w.coins().len(), 20);
        assert_eq!(w.balance(), 40.0);
    }

    #[tokio::test]
    async fn test_service_round_trip() {
        let service = WalletService::default();
        service.create_wallet("a").await.unwrap();
        service.create_wallet("b").await.unwrap();
        service
            .add_coin("a", Coin::new("Bitcoin", "BTC", 1.0, 10.0))
            .await
            .unwrap();
        service
            .update_coin("a", "BTC", Coin::new("Bitcoin", "BTC", 3.0, 10.0))
            .await
            .unwrap();
        assert_eq!(service.get_wallet("a").await.unwrap().balance(), 30.0);

        service.rename_wallet("a", "c").await.unwrap();
        let removed = service.remove_coin("c", "BTC").await.unwrap();
        assert_eq!(removed.amount, 3.0);

        service.delete_wallet("b").await.unwrap();
        let names: Vec<String> = service
            .list_wallets()
            .await
            .iter()
            .map(|w| w.name().to_string())
            .collect();
        assert_eq!(names, vec!["c".to_string()]);
    }
}
