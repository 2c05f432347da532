use thiserror::Error;

/// # Summary
/// 信号校验错误。`#[error]` 文案即 400 响应体中的 `error` 字段，
/// 外部信号源（TradingView 告警等）依赖这两条原文排障，不要改写。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalError {
    /// action/side 两个字段都无法解析出买卖方向
    #[error("action must be BUY or SELL")]
    InvalidAction,

    /// 仅支持市价单
    #[error("only MARKET supported")]
    UnsupportedOrderType,
}
