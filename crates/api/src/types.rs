//! # DTO (Data Transfer Object) 层
//!
//! 将 Webhook 请求 JSON 与内部领域模型之间做轻量转换。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。
//!
//! 响应体保持扁平 (不做统一包装)：信号源直接读取顶层的
//! `status` / `error` 字段判断结果。

use hikyaku_core::exchange::entity::OrderResult;
use hikyaku_core::signal::entity::SignalDraft;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================
//  请求 DTO
// ============================================================

/// Webhook 信号载荷
///
/// 所有字段均可省略，缺失时由服务端按默认值补全。
/// 载荷中出现的未知字段 (如 TradingView 模板附带的 `price`) 会被忽略。
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct WebhookRequest {
    /// 共享令牌 (也可通过 `?token=` 查询参数提供，正文优先)
    #[schema(example = "s3cret")]
    pub token: Option<String>,
    /// 交易动作 (BUY/SELL，大小写不敏感)
    #[schema(example = "BUY")]
    pub action: Option<String>,
    /// `action` 的别名，仅在 `action` 缺失或为空时生效
    #[schema(example = "sell")]
    pub side: Option<String>,
    /// 交易对，缺失时使用服务端默认值
    #[schema(example = "BTCUSDT")]
    pub symbol: Option<String>,
    /// 订单类型，当前仅支持 MARKET
    #[schema(example = "MARKET")]
    pub order_type: Option<String>,
    /// 动用余额百分比 (0-100]，缺失时为 100
    #[schema(value_type = Option<f64>, example = 25.0)]
    pub max_pct: Option<Decimal>,
}

// ============================================================
//  响应 DTO
// ============================================================

/// 健康检查响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// 进程存活标志，固定为 true
    #[schema(example = true)]
    pub ok: bool,
    /// 当前部署模式 (live/paper)
    #[schema(example = "paper")]
    pub mode: String,
    /// 真实下单开关
    #[schema(example = true)]
    pub trading_enabled: bool,
}

/// 干跑响应 - 信号已通过全部校验但未触达交易所
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DryRunResponse {
    /// 固定为 "dry-run"
    #[schema(example = "dry-run")]
    pub status: String,
    /// 规范化后的交易对
    #[schema(example = "BTCUSDT")]
    pub symbol: String,
    /// 规范化后的交易动作
    #[schema(example = "BUY")]
    pub action: String,
}

/// 成交响应 - 携带交易所回执原文
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FilledResponse {
    /// 固定为 "filled"
    #[schema(example = "filled")]
    pub status: String,
    /// 交易所返回的完整订单回执 (字段原样透传)
    #[schema(value_type = Object)]
    pub order: OrderResult,
}

/// Webhook 成功响应的两种形态
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum WebhookResponse {
    /// 干跑确认
    DryRun(DryRunResponse),
    /// 真实成交
    Filled(FilledResponse),
}

/// 失败响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 错误描述信息
    #[schema(example = "unauthorized")]
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

// ============================================================
//  DTO → 领域模型 惯用转换
// ============================================================

impl WebhookRequest {
    /// 拆分为鉴权令牌与待规范化的信号草稿
    pub fn into_parts(self) -> (Option<String>, SignalDraft) {
        let token = self.token;
        let draft = SignalDraft {
            action: self.action,
            side: self.side,
            symbol: self.symbol,
            order_type: self.order_type,
            max_pct: self.max_pct,
        };
        (token, draft)
    }
}
