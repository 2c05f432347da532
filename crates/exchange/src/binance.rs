use async_trait::async_trait;
use chrono::Utc;
use hikyaku_core::exchange::entity::{OrderResult, OrderSide, OrderSizing};
use hikyaku_core::exchange::error::ExchangeError;
use hikyaku_core::exchange::port::ExchangePort;
use hmac::{Hmac, Mac};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use sha2::Sha256;
use std::collections::HashMap;
use tracing::{error, info};

type HmacSha256 = Hmac<Sha256>;

/// # Summary
/// Binance 现货 REST 客户端，[`ExchangePort`] 的唯一实现。
///
/// # Invariants
/// - 所有私有接口请求都对完整查询串做 HMAC-SHA256 签名，
///   签名覆盖的字节序列与实际发出的查询串逐字节一致。
/// - 不设请求超时：等待时长由连接与交易所侧决定。
/// - 凭证为空不报错，首次调用时由交易所以 401 拒绝并透传上抛。
#[derive(Clone)]
pub struct BinanceSpotClient {
    /// 内部复用的 HTTP 客户端（连接池随进程存活）
    client: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl BinanceSpotClient {
    /// # Summary
    /// 创建一个新的 BinanceSpotClient 实例。
    ///
    /// # Arguments
    /// * `base_url` - REST 入口，主网或测试网，尾部斜杠会被剔除。
    /// * `api_key` - 放入 `X-MBX-APIKEY` 头的 API Key。
    /// * `api_secret` - 签名密钥。
    pub fn new(base_url: &str, api_key: &str, api_secret: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        }
    }

    /// 对查询串做 HMAC-SHA256 签名，输出小写十六进制。
    fn sign(&self, query: &str) -> Result<String, ExchangeError> {
        let mut mac = HmacSha256::new_from_slice(self.api_secret.as_bytes())
            .map_err(|e| ExchangeError::Signature(e.to_string()))?;
        mac.update(query.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// 拼出带签名的完整请求 URL。签名参数必须是最后一个。
    fn signed_url(&self, path: &str, params: &str) -> Result<String, ExchangeError> {
        let signature = self.sign(params)?;
        Ok(format!(
            "{}{}?{}&signature={}",
            self.base_url, path, params, signature
        ))
    }
}

#[async_trait]
impl ExchangePort for BinanceSpotClient {
    /// # Summary
    /// 拉取账户余额快照（`GET /api/v3/account`）。
    ///
    /// # Logic
    /// 1. 以毫秒时间戳构建查询串并签名。
    /// 2. 带 `X-MBX-APIKEY` 头发起请求。
    /// 3. 非 2xx 读取响应体原文并拒绝；2xx 解析后映射为 `资产 -> free`。
    async fn get_balances(&self) -> Result<HashMap<String, Decimal>, ExchangeError> {
        let params = format!("timestamp={}", Utc::now().timestamp_millis());
        let url = self.signed_url("/api/v3/account", &params)?;

        let resp = self
            .client
            .get(&url)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await
            .map_err(|e| ExchangeError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let error_text = resp
                .text()
                .await
                .map_err(|e| ExchangeError::Network(e.to_string()))?;
            error!("Binance account info failed: {}", error_text);
            return Err(ExchangeError::Rejected(error_text));
        }

        let account: AccountInformation = resp
            .json()
            .await
            .map_err(|e| ExchangeError::Parse(e.to_string()))?;

        Ok(account
            .balances
            .into_iter()
            .map(|b| (b.asset, b.free))
            .collect())
    }

    /// # Summary
    /// 提交一笔现货市价单（`POST /api/v3/order`）。
    ///
    /// # Logic
    /// 1. 按 `sizing` 生成参数：`QuoteSpend` 走 `quoteOrderQty`，
    ///    `BaseQuantity` 走 `quantity`。
    /// 2. 签名后参数全部放在查询串中，请求体为空。
    /// 3. 非 2xx 读取响应体原文并拒绝；2xx 解析为 [`OrderResult`]。
    async fn submit_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        sizing: OrderSizing,
    ) -> Result<OrderResult, ExchangeError> {
        let params = order_params(symbol, side, sizing, Utc::now().timestamp_millis());
        let url = self.signed_url("/api/v3/order", &params)?;

        info!(
            "Placing market order: {} {} (amount {})",
            side,
            symbol,
            sizing.amount()
        );

        let resp = self
            .client
            .post(&url)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await
            .map_err(|e| ExchangeError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let error_text = resp
                .text()
                .await
                .map_err(|e| ExchangeError::Network(e.to_string()))?;
            error!("Binance order failed: {}", error_text);
            return Err(ExchangeError::Rejected(error_text));
        }

        resp.json::<OrderResult>()
            .await
            .map_err(|e| ExchangeError::Parse(e.to_string()))
    }
}

/// 市价单查询串。`timestamp` 必须在签名前就位，之后不能再改动参数顺序。
fn order_params(symbol: &str, side: OrderSide, sizing: OrderSizing, timestamp_ms: i64) -> String {
    match sizing {
        OrderSizing::QuoteSpend(spend) => format!(
            "symbol={}&side={}&type=MARKET&quoteOrderQty={}&timestamp={}",
            symbol, side, spend, timestamp_ms
        ),
        OrderSizing::BaseQuantity(qty) => format!(
            "symbol={}&side={}&type=MARKET&quantity={}&timestamp={}",
            symbol, side, qty, timestamp_ms
        ),
    }
}

/// # Summary
/// Binance 账户信息回包（仅保留用到的字段）。
#[derive(Deserialize, Debug)]
struct AccountInformation {
    balances: Vec<BalanceEntry>,
}

/// # Summary
/// 单个资产的余额条目。`free` 为可用余额，冻结部分不参与下单计算。
#[derive(Deserialize, Debug)]
struct BalanceEntry {
    asset: String,
    free: Decimal,
}
