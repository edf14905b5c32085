//! 内存钱包存储
//!
//! 负责全部查找与修改逻辑：
//! - 钱包名全局唯一
//! - 同一钱包内币种名称、代码均不可重复
//! - 每次币种变更后重算余额并刷新 last_updated
//!
//! 本结构本身不加锁，并发访问由 [`crate::service::wallets::WalletService`] 串行化。

use std::{fmt, sync::Arc};

use chrono::NaiveDateTime;

use super::{
    error::StoreError,
    wallet::{Coin, Wallet},
};
use crate::utils::time_utils;

/// 时间来源
pub trait Clock: Send + Sync + fmt::Debug {
    /// 当前时间（分钟精度）
    fn now(&self) -> NaiveDateTime;
}

/// 系统本地时钟
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        time_utils::current_minute()
    }
}

#[derive(Debug)]
pub struct WalletStore {
    wallets: Vec<Wallet>,
    clock: Arc<dyn Clock>,
}

impl Default for WalletStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            wallets: Vec::new(),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    /// 按插入顺序返回全部钱包
    pub fn list(&self) -> &[Wallet] {
        &self.wallets
    }

    /// 线性查找，首个精确匹配生效
    pub fn find_by_name(&self, name: &str) -> Result<usize, StoreError> {
        self.wallets
            .iter()
            .position(|w| w.name() == name)
            .ok_or_else(|| StoreError::WalletNotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Result<&Wallet, StoreError> {
        let index = self.find_by_name(name)?;
        Ok(&self.wallets[index])
    }

    /// 创建钱包，追加到末尾
    pub fn create(&mut self, name: &str) -> Result<Wallet, StoreError> {
        if self.contains(name) {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        let wallet = Wallet::new(name, self.clock.now());
        self.wallets.push(wallet.clone());
        Ok(wallet)
    }

    /// 重命名钱包
    ///
    /// 新名称与整个存储比较（包括被重命名的钱包自身），
    /// 因此改成当前同名也会返回 `DuplicateName`。
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<Wallet, StoreError> {
        let index = self.find_by_name(old_name)?;
        if self.contains(new_name) {
            return Err(StoreError::DuplicateName(new_name.to_string()));
        }
        let now = self.clock.now();
        let wallet = &mut self.wallets[index];
        wallet.rename(new_name, now);
        Ok(wallet.clone())
    }

    /// 删除钱包，返回删除前的快照；其余钱包保持相对顺序
    pub fn delete(&mut self, name: &str) -> Result<Wallet, StoreError> {
        let index = self.find_by_name(name)?;
        Ok(self.wallets.remove(index))
    }

    pub fn add_coin(&mut self, wallet_name: &str, coin: Coin) -> Result<Coin, StoreError> {
        let now = self.clock.now();
        let wallet = self.wallet_mut(wallet_name)?;
        if wallet.has_duplicate(&coin.name, &coin.symbol, None) {
            return Err(duplicate_coin(wallet_name, &coin));
        }
        if !wallet.balance_with(&coin, None).is_finite() {
            return Err(balance_overflow(wallet_name, &coin));
        }
        wallet.push_coin(coin.clone(), now);
        Ok(coin)
    }

    /// 按代码定位币种并原位替换全部字段
    pub fn update_coin(
        &mut self,
        wallet_name: &str,
        symbol: &str,
        coin: Coin,
    ) -> Result<Coin, StoreError> {
        let now = self.clock.now();
        let wallet = self.wallet_mut(wallet_name)?;
        let index = wallet
            .coin_index(symbol)
            .ok_or_else(|| coin_not_found(wallet_name, symbol))?;
        if wallet.has_duplicate(&coin.name, &coin.symbol, Some(index)) {
            return Err(duplicate_coin(wallet_name, &coin));
        }
        if !wallet.balance_with(&coin, Some(index)).is_finite() {
            return Err(balance_overflow(wallet_name, &coin));
        }
        wallet.replace_coin(index, coin.clone(), now);
        Ok(coin)
    }

    /// 删除币种，返回被删除的币种
    pub fn remove_coin(&mut self, wallet_name: &str, symbol: &str) -> Result<Coin, StoreError> {
        let now = self.clock.now();
        let wallet = self.wallet_mut(wallet_name)?;
        let index = wallet
            .coin_index(symbol)
            .ok_or_else(|| coin_not_found(wallet_name, symbol))?;
        Ok(wallet.remove_coin_at(index, now))
    }

    fn contains(&self, name: &str) -> bool {
        self.wallets.iter().any(|w| w.name() == name)
    }

    fn wallet_mut(&mut self, name: &str) -> Result<&mut Wallet, StoreError> {
        let index = self.find_by_name(name)?;
        Ok(&mut self.wallets[index])
    }
}

fn coin_not_found(wallet: &str, symbol: &str) -> StoreError {
    StoreError::CoinNotFound {
        wallet: wallet.to_string(),
        symbol: symbol.to_string(),
    }
}

fn duplicate_coin(wallet: &str, coin: &Coin) -> StoreError {
    StoreError::DuplicateCoin {
        wallet: wallet.to_string(),
        name: coin.name.clone(),
        symbol: coin.symbol.clone(),
    }
}

fn balance_overflow(wallet: &str, coin: &Coin) -> StoreError {
    StoreError::BalanceOverflow {
        wallet: wallet.to_string(),
        symbol: coin.symbol.clone(),
    }
}
