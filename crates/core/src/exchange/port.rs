use crate::exchange::entity::{OrderResult, OrderSide, OrderSizing};
use crate::exchange::error::ExchangeError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// # Summary
/// 现货交易所的出站端口。适配器负责签名、传输与回包解析，
/// 调用方只面对强类型的余额与订单回报。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync` 以支持并发调用。
/// - 每次调用都是单次尝试：不重试、无幂等键。
/// - 端口本身不提供并发协调：同一交易对的两个并发信号可能基于同一份
///   余额快照各自下单（沿用上游单线程中继的假设，已知且不在此修复）。
#[async_trait]
pub trait ExchangePort: Send + Sync {
    /// # Summary
    /// 拉取账户全量余额快照。
    ///
    /// # Logic
    /// 1. 签名请求账户信息接口。
    /// 2. 将每个资产映射为其可用余额（free 部分，不含冻结）。
    ///
    /// # Returns
    /// * 成功返回 `资产代码 -> 可用数量` 的映射，包含零余额资产。
    /// * 失败返回 `Err(ExchangeError)`。
    async fn get_balances(&self) -> Result<HashMap<String, Decimal>, ExchangeError>;

    /// # Summary
    /// 提交一笔现货市价单。
    ///
    /// # Logic
    /// 1. 按 `sizing` 选择计价方式：`QuoteSpend` 按计价币金额，
    ///    `BaseQuantity` 按基础币数量。
    /// 2. 签名提交后将交易所回包解析为 [`OrderResult`]。
    ///
    /// # Arguments
    /// * `symbol` - 已大写化的交易对（如 `BTCUSDT`）。
    /// * `side` - 买卖方向。
    /// * `sizing` - 市价单计量方式与金额，允许为零（由交易所拒单）。
    ///
    /// # Returns
    /// * 成功返回交易所回报（未知字段原样保留）。
    /// * 失败返回 `Err(ExchangeError)`，错误原文供上层透传。
    async fn submit_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        sizing: OrderSizing,
    ) -> Result<OrderResult, ExchangeError>;
}
