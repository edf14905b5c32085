//! Coinfolio 主入口

use std::sync::Arc;

use anyhow::Result;
use coinfolio::{api, app_state::AppState, config::Config, infrastructure::logging};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 加载环境变量
    dotenvy::dotenv().ok();

    // 2. 加载配置（CONFIG_PATH 指向的 TOML 文件优先）
    let config_path = std::env::var("CONFIG_PATH").ok();
    let config = Config::from_env_and_file(config_path.as_deref())?;
    config.validate()?;

    // 3. 初始化日志
    logging::init_logging(&config.logging)?;
    tracing::info!("🚀 Starting Coinfolio wallet service");

    // 4. 初始化应用状态
    let bind_addr = config.server.bind_addr.clone();
    let state = Arc::new(AppState::new(Arc::new(config)));
    let app = api::routes(state);

    // 5. 启动服务
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("🎉 Server listening on http://{}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/docs", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("⚠️ Failed to listen for ctrl_c: {}", e);
        std::future::pending::<()>().await;
    }
}
