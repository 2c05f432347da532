//! # Webhook 信号路由控制器
//!
//! 整个服务的决策核心：校验调用方、解析并规范化信号、按余额百分比
//! 计算头寸、提交市价单 (或干跑短路)，最后通过 `Notifier` 发出
//! 成交 / 失败通知。通知失败只记日志，绝不影响 HTTP 响应。

use std::collections::HashMap;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, header};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use hikyaku_core::config::TradeMode;
use hikyaku_core::exchange::entity::{OrderResult, OrderSide, OrderSizing};
use hikyaku_core::exchange::error::ExchangeError;
use hikyaku_core::notify::port::Notifier;
use hikyaku_core::signal::entity::Signal;

use crate::auth::{presented_token, token_matches};
use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{
    ApiErrorResponse, DryRunResponse, FilledResponse, WebhookRequest, WebhookResponse,
};

/// 计价资产。BUY 按其余额乘百分比得出花费金额，
/// SELL 从交易对中剥离它得到基础资产。
const QUOTE_ASSET: &str = "USDT";

/// 查询参数中的令牌兜底
#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenQuery {
    pub token: Option<String>,
}

/// 接收交易信号并执行市价单
///
/// # Logic
/// 1. 请求自称 JSON 时解析正文，格式错误立即 400
/// 2. 校验共享令牌 (正文优先，查询参数兜底)，失败返回 401
/// 3. 非 JSON 请求在鉴权通过后返回 400 "expected JSON"
/// 4. 规范化信号：动作、交易对、订单类型、百分比
/// 5. 未开启真实下单时返回 "dry-run" 确认
/// 6. 查余额、算头寸、提交市价单，成功失败均发邮件通知
#[utoipa::path(
    post,
    path = "/webhook",
    tag = "交易信号 (Webhook)",
    params(
        ("token" = Option<String>, Query, description = "共享令牌 (正文 token 字段优先)")
    ),
    request_body = WebhookRequest,
    responses(
        (status = 200, description = "干跑确认或真实成交", body = WebhookResponse),
        (status = 400, description = "非 JSON 请求或信号不合法", body = ApiErrorResponse),
        (status = 401, description = "令牌缺失或不匹配", body = ApiErrorResponse),
        (status = 500, description = "交易所拒单或网络错误", body = ApiErrorResponse)
    )
)]
pub async fn webhook(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, ApiError> {
    // 1. 仅当请求自称 JSON 时才解析正文
    let request = if has_json_content_type(&headers) {
        let parsed: WebhookRequest = serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {}", e)))?;
        Some(parsed)
    } else {
        None
    };

    // 2. 共享令牌校验
    let (body_token, draft) = match request {
        Some(req) => {
            let (token, draft) = req.into_parts();
            (token, Some(draft))
        }
        None => (None, None),
    };
    let presented = presented_token(body_token.as_deref(), query.token.as_deref());
    if !token_matches(state.config.shared_token.as_deref(), presented.as_deref()) {
        return Err(ApiError::Unauthorized("unauthorized".to_string()));
    }

    // 3. 鉴权通过后，非 JSON 请求到此为止
    let Some(draft) = draft else {
        return Err(ApiError::BadRequest("expected JSON".to_string()));
    };

    // 4. 规范化信号
    let signal = draft.normalize(&state.config.default_symbol)?;
    tracing::info!(
        "Received signal: {} {} (max_pct {})",
        signal.side,
        signal.symbol,
        signal.max_pct
    );

    // 5. 干跑短路
    if !state.config.trading_enabled {
        tracing::info!("Trading disabled, acknowledging {} dry-run", signal.symbol);
        return Ok(Json(WebhookResponse::DryRun(DryRunResponse {
            status: "dry-run".to_string(),
            symbol: signal.symbol,
            action: signal.side.to_string(),
        })));
    }

    // 6. 执行并通知
    match execute_signal(&state, &signal).await {
        Ok(order) => {
            let subject = format!("{} executed {}", order.side, order.symbol);
            let summary = order_summary(&order, state.config.mode);
            deliver(state.notifier.as_ref(), &subject, &summary).await;
            Ok(Json(WebhookResponse::Filled(FilledResponse {
                status: "filled".to_string(),
                order,
            })))
        }
        Err(err) => {
            let message = err.to_string();
            let subject = format!("{} FAILED", signal.side);
            deliver(state.notifier.as_ref(), &subject, &message).await;
            Err(ApiError::Execution(message))
        }
    }
}

/// 查询余额、计算头寸并提交市价单
async fn execute_signal(state: &AppState, signal: &Signal) -> Result<OrderResult, ExchangeError> {
    let balances = state.exchange.get_balances().await?;
    let sizing = size_order(&balances, signal);
    state
        .exchange
        .submit_market_order(&signal.symbol, signal.side, sizing)
        .await
}

/// 按信号方向计算下单量
///
/// # Logic
/// 1. BUY: 计价资产余额 × max_pct% 作为花费金额
/// 2. SELL: 基础资产余额 × max_pct% 作为卖出数量
/// 3. 余额缺失按零处理，由交易所以原始错误文本拒单，本层不做预校验
fn size_order(balances: &HashMap<String, Decimal>, signal: &Signal) -> OrderSizing {
    match signal.side {
        OrderSide::Buy => {
            let quote = balances.get(QUOTE_ASSET).copied().unwrap_or(Decimal::ZERO);
            OrderSizing::QuoteSpend(percentage_of(quote, signal.max_pct))
        }
        OrderSide::Sell => {
            let asset = base_asset(&signal.symbol);
            let held = balances.get(&asset).copied().unwrap_or(Decimal::ZERO);
            OrderSizing::BaseQuantity(percentage_of(held, signal.max_pct))
        }
    }
}

fn percentage_of(balance: Decimal, pct: Decimal) -> Decimal {
    balance * pct / Decimal::ONE_HUNDRED
}

/// 从交易对中剥离计价资产得到基础资产
///
/// 注意是子串删除而非后缀剥离，仅服务 XXXUSDT 形态的现货对。
fn base_asset(symbol: &str) -> String {
    symbol.replace(QUOTE_ASSET, "")
}

/// 组装成交邮件正文
///
/// 字段全部取自交易所回执：首笔 fill 缺失时价格显示 N/A、手续费显示 0，
/// 成交时间缺失时显示 N/A。
fn order_summary(order: &OrderResult, mode: TradeMode) -> String {
    let fill = order.fills.first();
    let price = fill.and_then(|f| f.price.as_deref()).unwrap_or("N/A");
    let commission = fill.and_then(|f| f.commission.as_deref()).unwrap_or("0");
    let commission_asset = fill.and_then(|f| f.commission_asset.as_deref()).unwrap_or("");
    let transact_time = order
        .transact_time
        .map(|t| t.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "\nAction: {}\nSymbol: {}\nQuantity: {}\nPrice: {}\nMode: {}\nStatus: {}\nCommission: {} {}\nType: {}\nTransactTime: {}\n",
        order.side,
        order.symbol,
        order.executed_qty,
        price,
        mode,
        order.status,
        commission,
        commission_asset,
        order.order_type,
        transact_time,
    )
}

/// 发送通知并吞掉失败，通知绝不阻断主响应
async fn deliver(notifier: &dyn Notifier, subject: &str, body: &str) {
    if let Err(err) = notifier.notify(subject, body).await {
        tracing::error!("Failed to send notification '{}': {}", subject, err);
    }
}

/// 内容类型判定：`application/json` 或任意 `+json` 后缀视为 JSON 请求
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return false;
    };
    let Ok(raw) = value.to_str() else {
        return false;
    };
    let mime = raw.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

// ============================================================
//  单元测试
// ============================================================
