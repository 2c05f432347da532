use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// 订单的交易方向。`Display` 输出交易所要求的大写形式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    /// 买入（以计价币消费）
    Buy,
    /// 卖出（以基础币计量）
    Sell,
}

impl FromStr for OrderSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BUY" => Ok(OrderSide::Buy),
            "SELL" => Ok(OrderSide::Sell),
            _ => Err(format!("Unknown order side: {}", s)),
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

/// # Summary
/// 市价单的计量方式。BUY 按计价币金额下单，SELL 按基础币数量下单，
/// 二者在交易所请求中对应不同的参数（`quoteOrderQty` / `quantity`）。
///
/// # Invariants
/// - 金额可以为零：余额不足时照常提交，由交易所拒单，本系统不做预校验。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSizing {
    /// 花费的计价币金额（如 250 USDT）
    QuoteSpend(Decimal),
    /// 卖出的基础币数量（如 2 ETH）
    BaseQuantity(Decimal),
}

impl OrderSizing {
    pub fn amount(&self) -> Decimal {
        match self {
            OrderSizing::QuoteSpend(v) | OrderSizing::BaseQuantity(v) => *v,
        }
    }
}

/// # Summary
/// 单笔成交明细。交易所以字符串形式返回数值，原样保留不做解析，
/// 字段缺失时由摘要层补默认值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission: Option<String>,
    #[serde(
        rename = "commissionAsset",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub commission_asset: Option<String>,
    /// 交易所返回的其余字段，原样透传
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// # Summary
/// 交易所的下单回报。已知字段做类型化便于摘要，未知字段通过
/// `extra` 扁平化保留，保证 HTTP 响应能原样转发交易所回包。
///
/// # Invariants
/// - 序列化结果与交易所原始 JSON 字段一致（已知字段 + `extra` 合并）。
/// - 顶层字段缺失时反序列化不报错，置空串/空列表由上层容错。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    #[serde(default)]
    pub side: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "executedQty", default)]
    pub executed_qty: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "type", default)]
    pub order_type: String,
    #[serde(
        rename = "transactTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transact_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<OrderFill>,
    /// 交易所返回的其余字段（orderId、cummulativeQuoteQty 等），原样透传
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_side_parsing() {
        assert_eq!("buy".parse::<OrderSide>(), Ok(OrderSide::Buy));
        assert_eq!("BUY".parse::<OrderSide>(), Ok(OrderSide::Buy));
        assert_eq!("Sell".parse::<OrderSide>(), Ok(OrderSide::Sell));
        assert!("hold".parse::<OrderSide>().is_err());
        assert!("".parse::<OrderSide>().is_err());
    }

    #[test]
    fn test_order_side_display_is_uppercase() {
        assert_eq!(OrderSide::Buy.to_string(), "BUY");
        assert_eq!(OrderSide::Sell.to_string(), "SELL");
    }

    #[test]
    fn test_order_result_roundtrip_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "symbol": "BTCUSDT",
            "orderId": 28,
            "clientOrderId": "6gCrw2kRUAF9CvJDGP16IP",
            "transactTime": 1507725176595u64,
            "executedQty": "10.00000000",
            "status": "FILLED",
            "type": "MARKET",
            "side": "SELL",
            "fills": [
                {
                    "price": "4000.00000000",
                    "qty": "1.00000000",
                    "commission": "4.00000000",
                    "commissionAsset": "USDT",
                    "tradeId": 56
                }
            ]
        });
        let order: OrderResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(order.side, "SELL");
        assert_eq!(order.executed_qty, "10.00000000");
        assert_eq!(order.transact_time, Some(1507725176595));
        assert_eq!(order.fills.len(), 1);
        assert_eq!(order.fills[0].price.as_deref(), Some("4000.00000000"));
        assert_eq!(order.extra.get("orderId"), Some(&serde_json::json!(28)));
        assert_eq!(order.fills[0].extra.get("tradeId"), Some(&serde_json::json!(56)));

        // 往返序列化后字段不丢失
        let back = serde_json::to_value(&order).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_order_result_tolerates_missing_fields() {
        let order: OrderResult = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(order.side, "");
        assert_eq!(order.executed_qty, "");
        assert_eq!(order.transact_time, None);
        assert!(order.fills.is_empty());
    }
}
