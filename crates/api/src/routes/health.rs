//! # 健康检查路由控制器
//!
//! 供部署平台 (Render/Railway 等) 的存活探针调用，无需鉴权，无任何副作用。

use axum::Json;
use axum::extract::State;

use crate::server::AppState;
use crate::types::HealthResponse;

/// 进程存活探针
///
/// 返回当前部署模式与真实下单开关，便于在不触发交易的前提下
/// 确认线上配置是否符合预期。
#[utoipa::path(
    get,
    path = "/health",
    tag = "系统 (System)",
    responses(
        (status = 200, description = "进程存活", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        mode: state.config.mode.to_string(),
        trading_enabled: state.config.trading_enabled,
    })
}
