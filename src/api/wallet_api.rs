//! 钱包 API：创建、列表、重命名、删除

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    api::{
        extract::JsonBody,
        middleware::TraceId,
        response::{respond, success_response, ApiResponse, WalletEnvelopeDoc, WalletListEnvelopeDoc},
    },
    app_state::AppState,
    domain::Wallet,
    error::AppError,
    error_body::ErrorBodyDoc,
    utils::{is_blank, trim_brackets},
};

/// 创建 / 重命名请求体
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct WalletNameReq {
    pub name: String,
}

impl WalletNameReq {
    fn into_name(self) -> Result<String, AppError> {
        if is_blank(&self.name) {
            return Err(AppError::invalid_input(
                "Invalid Types. wallet name must not be empty",
            ));
        }
        Ok(self.name)
    }
}

#[derive(Debug, Serialize)]
pub struct WalletListResp {
    pub size: usize,
    pub wallets: Vec<Wallet>,
}

#[utoipa::path(
    post,
    path = "/api/v1/wallets",
    tag = "wallets",
    request_body = WalletNameReq,
    responses(
        (status = 200, description = "Wallet added", body = WalletEnvelopeDoc),
        (status = 400, description = "Invalid input", body = ErrorBodyDoc),
        (status = 406, description = "Duplicate wallet name", body = ErrorBodyDoc)
    )
)]
pub async fn create_wallet(
    State(st): State<Arc<AppState>>,
    Extension(trace_id): Extension<TraceId>,
    body: Result<JsonBody<WalletNameReq>, AppError>,
) -> Result<Json<ApiResponse<Wallet>>, AppError> {
    let result = async {
        let JsonBody(req) = body?;
        let name = req.into_name()?;
        let wallet = st.wallets.create_wallet(&name).await?;
        success_response(wallet, "Wallet added successfully!")
    }
    .await;
    respond("POST /api/v1/wallets", &trace_id, result)
}

#[utoipa::path(
    get,
    path = "/api/v1/wallets",
    tag = "wallets",
    responses(
        (status = 200, description = "All wallets in insertion order", body = WalletListEnvelopeDoc)
    )
)]
pub async fn list_wallets(
    State(st): State<Arc<AppState>>,
    Extension(trace_id): Extension<TraceId>,
) -> Result<Json<ApiResponse<WalletListResp>>, AppError> {
    let wallets = st.wallets.list_wallets().await;
    let result = success_response(
        WalletListResp {
            size: wallets.len(),
            wallets,
        },
        "All wallets received successfully!",
    );
    respond("GET /api/v1/wallets", &trace_id, result)
}

#[utoipa::path(
    put,
    path = "/api/v1/wallets/{wname}",
    tag = "wallets",
    params(("wname" = String, Path, description = "Current wallet name")),
    request_body = WalletNameReq,
    responses(
        (status = 200, description = "Wallet renamed", body = WalletEnvelopeDoc),
        (status = 400, description = "Invalid input", body = ErrorBodyDoc),
        (status = 404, description = "Wallet not found", body = ErrorBodyDoc),
        (status = 406, description = "New name is duplicate", body = ErrorBodyDoc)
    )
)]
pub async fn rename_wallet(
    State(st): State<Arc<AppState>>,
    Extension(trace_id): Extension<TraceId>,
    Path(wname): Path<String>,
    body: Result<JsonBody<WalletNameReq>, AppError>,
) -> Result<Json<ApiResponse<Wallet>>, AppError> {
    let result = async {
        let JsonBody(req) = body?;
        let new_name = req.into_name()?;
        let wallet = st
            .wallets
            .rename_wallet(trim_brackets(&wname), &new_name)
            .await?;
        success_response(wallet, "Wallet name changed successfully!")
    }
    .await;
    respond("PUT /api/v1/wallets/:wname", &trace_id, result)
}

#[utoipa::path(
    delete,
    path = "/api/v1/wallets/{wname}",
    tag = "wallets",
    params(("wname" = String, Path, description = "Wallet name")),
    responses(
        (status = 200, description = "Snapshot of the deleted wallet", body = WalletEnvelopeDoc),
        (status = 404, description = "Wallet not found", body = ErrorBodyDoc)
    )
)]
pub async fn delete_wallet(
    State(st): State<Arc<AppState>>,
    Extension(trace_id): Extension<TraceId>,
    Path(wname): Path<String>,
) -> Result<Json<ApiResponse<Wallet>>, AppError> {
    let result = async {
        let wallet = st.wallets.delete_wallet(trim_brackets(&wname)).await?;
        success_response(wallet, "Wallet deleted (logged out) successfully!")
    }
    .await;
    respond("DELETE /api/v1/wallets/:wname", &trace_id, result)
}
