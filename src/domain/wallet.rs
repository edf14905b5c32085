//! 钱包与币种领域模型
//!
//! Wallet 自己维护 balance 不变量：任何币种变更之后都全量重算
//! `Σ amount * rate`，外部无法直接设置余额。

use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

/// 单个币种持仓
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Coin {
    /// 显示名称
    pub name: String,
    /// 代码（钱包内唯一，区分大小写）
    pub symbol: String,
    /// 持有数量
    pub amount: f64,
    /// 单价
    pub rate: f64,
}

impl Coin {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, amount: f64, rate: f64) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            amount,
            rate,
        }
    }

    /// 持仓价值
    pub fn value(&self) -> f64 {
        self.amount * self.rate
    }

    /// 名称或代码任一相同即视为重复
    pub fn collides_with(&self, name: &str, symbol: &str) -> bool {
        self.name == name || self.symbol == symbol
    }
}

/// 钱包
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Wallet {
    name: String,
    balance: f64,
    coins: Vec<Coin>,
    #[serde(serialize_with = "crate::utils::time_utils::minute_format::serialize")]
    #[schema(value_type = String, example = "2024-03-07 09:05")]
    last_updated: NaiveDateTime,
}

impl Wallet {
    /// 新钱包：余额为 0，无币种
    pub fn new(name: impl Into<String>, now: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            balance: 0.0,
            coins: Vec::new(),
            last_updated: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn last_updated(&self) -> NaiveDateTime {
        self.last_updated
    }

    /// 按代码查找币种位置（精确匹配，首个命中）
    pub fn coin_index(&self, symbol: &str) -> Option<usize> {
        self.coins.iter().position(|c| c.symbol == symbol)
    }

    /// 是否与钱包内其他币种重名或同代码；`skip` 为被替换的币种位置
    pub fn has_duplicate(&self, name: &str, symbol: &str, skip: Option<usize>) -> bool {
        self.coins
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .any(|(_, c)| c.collides_with(name, symbol))
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>, now: NaiveDateTime) {
        self.name = name.into();
        self.last_updated = now;
    }

    pub(crate) fn push_coin(&mut self, coin: Coin, now: NaiveDateTime) {
        self.coins.push(coin);
        self.recompute_balance();
        self.last_updated = now;
    }

    pub(crate) fn replace_coin(&mut self, index: usize, coin: Coin, now: NaiveDateTime) {
        self.coins[index] = coin;
        self.recompute_balance();
        self.last_updated = now;
    }

    pub(crate) fn remove_coin_at(&mut self, index: usize, now: NaiveDateTime) -> Coin {
        let removed = self.coins.remove(index);
        self.recompute_balance();
        self.last_updated = now;
        removed
    }

    /// 写入 `coin` 之后的余额；`replacing` 为被替换的币种位置
    pub fn balance_with(&self, coin: &Coin, replacing: Option<usize>) -> f64 {
        self.coins
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != replacing)
            .fold(coin.value(), |acc, (_, c)| acc + c.value())
    }

    fn recompute_balance(&mut self) {
        self.balance = self.coins.iter().fold(0.0, |acc, c| acc + c.value());
    }
}
