use crate::exchange::entity::OrderSide;
use crate::signal::error::SignalError;
use rust_decimal::Decimal;

/// # Summary
/// 未规范化的原始信号字段，由 HTTP DTO 原样搬运而来。
/// 空字符串与缺失字段等价（信号源经常发空串占位）。
#[derive(Debug, Clone, Default)]
pub struct SignalDraft {
    /// 买卖方向，`side` 的同义字段且优先级更高
    pub action: Option<String>,
    /// 买卖方向的别名字段
    pub side: Option<String>,
    pub symbol: Option<String>,
    /// 仅接受 MARKET（忽略大小写），缺省即 MARKET
    pub order_type: Option<String>,
    /// 动用余额的百分比，缺省 100，不做范围校验
    pub max_pct: Option<Decimal>,
}

/// # Summary
/// 规范化后的强类型交易信号，进入执行路径的唯一形态。
///
/// # Invariants
/// - `symbol` 已大写化。
/// - 方向在进入任何交易所调用前已经收敛为 BUY/SELL 之一。
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub side: OrderSide,
    pub symbol: String,
    pub max_pct: Decimal,
}

impl SignalDraft {
    /// # Summary
    /// 将原始字段规范化为 [`Signal`]。
    ///
    /// # Logic
    /// 1. `action` 优先，空值回退到 `side`，再解析为买卖方向。
    /// 2. `order_type` 大写化后必须是 `MARKET`。
    /// 3. `symbol` 缺省取 `default_symbol`，一律大写化。
    /// 4. `max_pct` 缺省 100。刻意不做 0~100 范围校验，越界值
    ///    产生的异常订单由交易所拒绝。
    ///
    /// # Returns
    /// * 成功返回规范化信号。
    /// * 失败返回 [`SignalError`]，文案直接进入 400 响应体。
    pub fn normalize(self, default_symbol: &str) -> Result<Signal, SignalError> {
        let action = self
            .action
            .filter(|v| !v.is_empty())
            .or(self.side.filter(|v| !v.is_empty()))
            .unwrap_or_default();
        let side: OrderSide = action.parse().map_err(|_| SignalError::InvalidAction)?;

        let order_type = self
            .order_type
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "MARKET".to_string())
            .to_uppercase();
        if order_type != "MARKET" {
            return Err(SignalError::UnsupportedOrderType);
        }

        let symbol = self
            .symbol
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default_symbol.to_string())
            .to_uppercase();

        Ok(Signal {
            side,
            symbol,
            max_pct: self.max_pct.unwrap_or(Decimal::ONE_HUNDRED),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SignalDraft {
        SignalDraft::default()
    }

    #[test]
    fn test_mixed_case_action_normalizes() {
        let signal = SignalDraft {
            action: Some("Buy".to_string()),
            ..draft()
        }
        .normalize("BTCUSDT")
        .unwrap();
        assert_eq!(signal.side, OrderSide::Buy);
        assert_eq!(signal.symbol, "BTCUSDT");
        assert_eq!(signal.max_pct, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_side_is_accepted_as_alias() {
        let signal = SignalDraft {
            side: Some("sell".to_string()),
            ..draft()
        }
        .normalize("BTCUSDT")
        .unwrap();
        assert_eq!(signal.side, OrderSide::Sell);
    }

    #[test]
    fn test_action_takes_precedence_over_side() {
        let signal = SignalDraft {
            action: Some("BUY".to_string()),
            side: Some("SELL".to_string()),
            ..draft()
        }
        .normalize("BTCUSDT")
        .unwrap();
        assert_eq!(signal.side, OrderSide::Buy);
    }

    #[test]
    fn test_empty_action_falls_back_to_side() {
        let signal = SignalDraft {
            action: Some(String::new()),
            side: Some("sell".to_string()),
            ..draft()
        }
        .normalize("BTCUSDT")
        .unwrap();
        assert_eq!(signal.side, OrderSide::Sell);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let err = SignalDraft {
            action: Some("hold".to_string()),
            ..draft()
        }
        .normalize("BTCUSDT")
        .unwrap_err();
        assert_eq!(err, SignalError::InvalidAction);
        assert_eq!(err.to_string(), "action must be BUY or SELL");
    }

    #[test]
    fn test_missing_action_and_side_is_rejected() {
        let err = draft().normalize("BTCUSDT").unwrap_err();
        assert_eq!(err, SignalError::InvalidAction);
    }

    #[test]
    fn test_limit_order_type_is_rejected() {
        let err = SignalDraft {
            action: Some("BUY".to_string()),
            order_type: Some("LIMIT".to_string()),
            ..draft()
        }
        .normalize("BTCUSDT")
        .unwrap_err();
        assert_eq!(err, SignalError::UnsupportedOrderType);
        assert_eq!(err.to_string(), "only MARKET supported");
    }

    #[test]
    fn test_lowercase_market_is_accepted() {
        let signal = SignalDraft {
            action: Some("SELL".to_string()),
            order_type: Some("market".to_string()),
            ..draft()
        }
        .normalize("BTCUSDT")
        .unwrap();
        assert_eq!(signal.side, OrderSide::Sell);
    }

    #[test]
    fn test_symbol_defaults_and_uppercases() {
        let signal = SignalDraft {
            action: Some("BUY".to_string()),
            symbol: Some("ethusdt".to_string()),
            ..draft()
        }
        .normalize("BTCUSDT")
        .unwrap();
        assert_eq!(signal.symbol, "ETHUSDT");

        let signal = SignalDraft {
            action: Some("BUY".to_string()),
            symbol: Some(String::new()),
            ..draft()
        }
        .normalize("solusdt")
        .unwrap();
        assert_eq!(signal.symbol, "SOLUSDT");
    }

    #[test]
    fn test_max_pct_is_preserved() {
        let signal = SignalDraft {
            action: Some("BUY".to_string()),
            max_pct: Some(Decimal::from(25)),
            ..draft()
        }
        .normalize("BTCUSDT")
        .unwrap();
        assert_eq!(signal.max_pct, Decimal::from(25));
    }
}
