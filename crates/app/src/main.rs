use std::sync::Arc;

use hikyaku_api::server::{AppState, start_server};
use hikyaku_core::config::AppConfig;
use hikyaku_core::notify::port::Notifier;
use hikyaku_exchange::binance::BinanceSpotClient;
use hikyaku_notify::email::EmailNotifier;
use hikyaku_notify::noop::NoopNotifier;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化交易所与通知适配器，并通过 Arc<dyn Trait> 注入 HTTP 网关。
///
/// # Logic
/// 1. 加载 .env 并初始化全局日志。
/// 2. 读取环境变量，固化配置快照。
/// 3. 实例化适配器层（Exchange、Notifier）。
/// 4. 组装共享状态并启动 HTTP 服务。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化环境与日志
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    info!("Hikyaku relay starting...");

    // 2. 固化配置快照
    let config = Arc::new(AppConfig::from_env()?);
    info!(
        "Mode: {}, default symbol: {}, trading enabled: {}, default quote qty: {}",
        config.mode, config.default_symbol, config.trading_enabled, config.default_quote_qty
    );

    // 3. 实例化适配器层（App 层知道具体实现，网关只见 Trait）
    let exchange = Arc::new(BinanceSpotClient::new(
        &config.exchange.base_url,
        &config.exchange.api_key,
        &config.exchange.api_secret,
    ));

    let notifier: Arc<dyn Notifier> = match &config.email {
        Some(email) => Arc::new(EmailNotifier::new(&email.user, &email.pass, &email.to)?),
        None => {
            warn!("Email credentials not configured, notifications disabled");
            Arc::new(NoopNotifier)
        }
    };

    // 4. 组装共享状态并启动服务
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        config,
        exchange,
        notifier,
    };

    start_server(state, &bind_addr).await
}
