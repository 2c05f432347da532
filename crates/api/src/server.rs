//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use hikyaku_core::config::AppConfig;
use hikyaku_core::exchange::port::ExchangePort;
use hikyaku_core::notify::port::Notifier;

use crate::routes::{health, webhook};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 所有成员在服务启动前由 DI 容器注入，生命周期与进程等同。
/// - `config` 启动后不可变，干跑开关等标志不支持热更新。
#[derive(Clone)]
pub struct AppState {
    /// 启动时固化的配置快照
    pub config: Arc<AppConfig>,
    /// 交易所适配器 (余额查询与市价下单)
    pub exchange: Arc<dyn ExchangePort>,
    /// 通知适配器 (成交 / 失败邮件)
    pub notifier: Arc<dyn Notifier>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hikyaku 信号中继 API",
        version = "0.1.0",
        description = "接收 TradingView 等信号源的 Webhook，按余额百分比在币安现货执行市价单，并通过邮件回报成交结果。",
        contact(name = "Hikyaku Team"),
        license(name = "MIT")
    ),
    tags(
        (name = "交易信号 (Webhook)", description = "信号接收、校验与市价单执行"),
        (name = "系统 (System)", description = "健康检查与部署状态")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 构建完整的 axum 应用路由树 (含 Swagger UI)。
///
/// 独立于 `start_server` 暴露，测试可以把它挂到任意 listener 上，
/// 不必占用固定端口。
pub fn build_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health::health))
        .routes(routes!(webhook::webhook))
        .with_state(state)
        .split_for_parts();

    router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
}

/// 构建路由树并启动 HTTP 监听。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"127.0.0.1:8000"`
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    tracing::info!("🚀 Hikyaku relay listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
