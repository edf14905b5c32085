//! 币种 API：查看钱包、添加 / 更新 / 删除币种

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    api::{
        extract::JsonBody,
        middleware::TraceId,
        response::{respond, success_response, ApiResponse, CoinEnvelopeDoc, WalletEnvelopeDoc},
    },
    app_state::AppState,
    domain::{Coin, Wallet},
    error::AppError,
    error_body::ErrorBodyDoc,
    utils::{is_blank, trim_brackets},
};

/// 添加 / 更新币种请求体
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CoinReq {
    pub name: String,
    pub symbol: String,
    pub amount: f64,
    pub rate: f64,
}

impl CoinReq {
    /// 名称与代码非空，数量、汇率及其乘积必须是有限数
    fn into_coin(self) -> Result<Coin, AppError> {
        if is_blank(&self.name) || is_blank(&self.symbol) {
            return Err(AppError::invalid_input(
                "Invalid Types. coin name and symbol must not be empty",
            ));
        }
        if !self.amount.is_finite() || !self.rate.is_finite() {
            return Err(AppError::invalid_input(
                "Invalid Types. amount and rate must be finite numbers",
            ));
        }
        let coin = Coin::new(self.name, self.symbol, self.amount, self.rate);
        if !coin.value().is_finite() {
            return Err(AppError::invalid_input(
                "Invalid Types. amount * rate must be a finite number",
            ));
        }
        Ok(coin)
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/wallets/{wname}",
    tag = "coins",
    params(("wname" = String, Path, description = "Wallet name")),
    responses(
        (status = 200, description = "Wallet with all coins", body = WalletEnvelopeDoc),
        (status = 404, description = "Wallet not found", body = ErrorBodyDoc)
    )
)]
pub async fn get_wallet_info(
    State(st): State<Arc<AppState>>,
    Extension(trace_id): Extension<TraceId>,
    Path(wname): Path<String>,
) -> Result<Json<ApiResponse<Wallet>>, AppError> {
    let result = async {
        let wallet = st.wallets.get_wallet(trim_brackets(&wname)).await?;
        success_response(wallet, "All coins received successfully!")
    }
    .await;
    respond("GET /api/v1/wallets/:wname", &trace_id, result)
}

#[utoipa::path(
    post,
    path = "/api/v1/wallets/{wname}/coins",
    tag = "coins",
    params(("wname" = String, Path, description = "Wallet name")),
    request_body = CoinReq,
    responses(
        (status = 200, description = "Coin added", body = CoinEnvelopeDoc),
        (status = 400, description = "Invalid input", body = ErrorBodyDoc),
        (status = 404, description = "Wallet not found", body = ErrorBodyDoc),
        (status = 406, description = "Coin name or symbol already in wallet", body = ErrorBodyDoc)
    )
)]
pub async fn add_coin(
    State(st): State<Arc<AppState>>,
    Extension(trace_id): Extension<TraceId>,
    Path(wname): Path<String>,
    body: Result<JsonBody<CoinReq>, AppError>,
) -> Result<Json<ApiResponse<Coin>>, AppError> {
    let result = async {
        let JsonBody(req) = body?;
        let coin = req.into_coin()?;
        let coin = st.wallets.add_coin(trim_brackets(&wname), coin).await?;
        success_response(coin, "Coin added successfully!")
    }
    .await;
    respond("POST /api/v1/wallets/:wname/coins", &trace_id, result)
}

#[utoipa::path(
    put,
    path = "/api/v1/wallets/{wname}/coins/{symbol}",
    tag = "coins",
    params(
        ("wname" = String, Path, description = "Wallet name"),
        ("symbol" = String, Path, description = "Symbol of the coin to replace")
    ),
    request_body = CoinReq,
    responses(
        (status = 200, description = "Coin replaced", body = CoinEnvelopeDoc),
        (status = 400, description = "Invalid input", body = ErrorBodyDoc),
        (status = 404, description = "Wallet or coin not found", body = ErrorBodyDoc),
        (status = 406, description = "Collides with another coin", body = ErrorBodyDoc)
    )
)]
pub async fn update_coin(
    State(st): State<Arc<AppState>>,
    Extension(trace_id): Extension<TraceId>,
    Path((wname, symbol)): Path<(String, String)>,
    body: Result<JsonBody<CoinReq>, AppError>,
) -> Result<Json<ApiResponse<Coin>>, AppError> {
    let result = async {
        let JsonBody(req) = body?;
        let coin = req.into_coin()?;
        let coin = st
            .wallets
            .update_coin(trim_brackets(&wname), trim_brackets(&symbol), coin)
            .await?;
        success_response(coin, "Coin updated successfully!")
    }
    .await;
    respond("PUT /api/v1/wallets/:wname/coins/:symbol", &trace_id, result)
}

#[utoipa::path(
    delete,
    path = "/api/v1/wallets/{wname}/coins/{symbol}",
    tag = "coins",
    params(
        ("wname" = String, Path, description = "Wallet name"),
        ("symbol" = String, Path, description = "Coin symbol")
    ),
    responses(
        (status = 200, description = "Snapshot of the removed coin", body = CoinEnvelopeDoc),
        (status = 404, description = "Wallet or coin not found", body = ErrorBodyDoc)
    )
)]
pub async fn remove_coin(
    State(st): State<Arc<AppState>>,
    Extension(trace_id): Extension<TraceId>,
    Path((wname, symbol)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Coin>>, AppError> {
    let result = async {
        let coin = st
            .wallets
            .remove_coin(trim_brackets(&wname), trim_brackets(&symbol))
            .await?;
        success_response(coin, "Coin deleted successfully!")
    }
    .await;
    respond("DELETE /api/v1/wallets/:wname/coins/:symbol", &trace_id, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(name: &str, symbol: &str, amount: f64, rate: f64) -> CoinReq {
        CoinReq {
            name: name.into(),
            symbol: symbol.into(),
            amount,
            rate,
        }
    }

    #[test]
    fn test_into_coin_rejects_blank_fields() {
        assert!(req("", "BTC", 1.0, 1.0).into_coin().is_err());
        assert!(req("Bitcoin", "  ", 1.0, 1.0).into_coin().is_err());
    }

    #[test]
    fn test_into_coin_rejects_non_finite() {
        assert!(req("Bitcoin", "BTC", f64::NAN, 1.0).into_coin().is_err());
        assert!(req("Bitcoin", "BTC", 1.0, f64::INFINITY).into_coin().is_err());
        assert!(req("Big", "BIG", 1e200, 1e200).into_coin().is_err());
    }

    #[test]
    fn test_into_coin_accepts_zero_and_negative() {
        let coin = req("Bitcoin", "BTC", 0.0, -2.5).into_coin().unwrap();
        assert_eq!(coin.value(), 0.0);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = serde_json::from_str::<CoinReq>(
            r#"{"name":"Bitcoin","symbol":"BTC","amount":1,"rate":2,"extra":true}"#,
        );
        assert!(err.is_err());
    }
}
