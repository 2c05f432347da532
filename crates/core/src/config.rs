//! # 配置模块
//!
//! 启动时一次性读取环境变量（`.env` 由二进制入口加载），固化为不可变的
//! [`AppConfig`] 快照，随后以 `Arc` 注入 HTTP 层。运行期不再读取任何环境变量。
//!
//! ## 环境变量一览
//! | 变量 | 默认值 | 说明 |
//! |------|--------|------|
//! | `HIKYAKU_MODE` | `paper` | `live` 走 Binance 主网，`paper` 走测试网 |
//! | `HIKYAKU_SHARED_TOKEN` | 无 | Webhook 共享令牌；未设置时所有请求都会被拒绝 |
//! | `HIKYAKU_DEFAULT_SYMBOL` | `BTCUSDT` | 信号未携带 symbol 时的默认交易对 |
//! | `HIKYAKU_DEFAULT_QUOTE_QTY` | `50` | 默认计价币数量（仅做启动摘要展示） |
//! | `HIKYAKU_TRADING_ENABLED` | `true` | 非 `true`（忽略大小写）时进入 dry-run |
//! | `HIKYAKU_EMAIL_USER` / `_PASS` / `_TO` | 无 | 三者齐备才会启用邮件通知 |
//! | `HIKYAKU_HOST` / `HIKYAKU_PORT` | `127.0.0.1` / `8000` | HTTP 监听地址 |
//! | `BINANCE_API_KEY` / `BINANCE_API_SECRET` | 空 | live 模式凭证 |
//! | `BINANCE_TESTNET_API_KEY` / `BINANCE_TESTNET_API_SECRET` | 空 | paper 模式凭证 |
//!
//! 凭证缺失不阻止启动：空字符串会在首次调用交易所时以签名错误暴露。

use rust_decimal::Decimal;
use thiserror::Error;

/// Binance 现货主网 REST 入口
pub const MAINNET_BASE_URL: &str = "https://api.binance.com";
/// Binance 现货测试网 REST 入口
pub const TESTNET_BASE_URL: &str = "https://testnet.binance.vision";

/// # Summary
/// 配置解析错误。值存在但无法解析时进程拒绝启动。
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 环境变量的值无法解析为期望类型
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// # Summary
/// 交易模式。决定交易所入口与凭证来源，并回显在 `/health` 与邮件正文中。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeMode {
    /// 主网实盘
    Live,
    /// 测试网模拟盘
    Paper,
}

impl std::fmt::Display for TradeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeMode::Live => write!(f, "live"),
            TradeMode::Paper => write!(f, "paper"),
        }
    }
}

/// # Summary
/// 全局应用配置快照。
///
/// # Invariants
/// - 构建完成后不可变，请求处理路径上只读。
/// - `shared_token` 为 `None` 时（未设置或为空串），所有 Webhook 请求返回 401。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: TradeMode,
    pub exchange: ExchangeConfig,
    pub shared_token: Option<String>,
    /// 信号缺省时使用的交易对（已大写化）
    pub default_symbol: String,
    /// 默认计价币数量，仅用于启动摘要
    pub default_quote_qty: Decimal,
    /// false 时 Webhook 走 dry-run 短路，不触达交易所
    pub trading_enabled: bool,
    pub email: Option<EmailConfig>,
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// 发件人地址，同时作为 SMTP 登录用户名
    pub user: String,
    pub pass: String,
    pub to: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// # Summary
    /// 从进程环境变量构建配置快照。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// # Summary
    /// 从任意键值查找函数构建配置快照。
    ///
    /// # Logic
    /// 1. 解析交易模式，未知值告警并回退 paper。
    /// 2. 按模式选择交易所入口与对应凭证变量。
    /// 3. 空字符串一律视为未设置（令牌、symbol、邮件字段）。
    /// 4. 数值字段解析失败返回 [`ConfigError::InvalidValue`]。
    ///
    /// # Arguments
    /// * `lookup` - 键值查找函数。测试中传入闭包即可，无需改写进程环境。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup("HIKYAKU_MODE") {
            None => TradeMode::Paper,
            Some(raw) => match raw.to_lowercase().as_str() {
                "live" => TradeMode::Live,
                "paper" | "" => TradeMode::Paper,
                other => {
                    tracing::warn!("Unknown HIKYAKU_MODE {:?}, falling back to paper mode", other);
                    TradeMode::Paper
                }
            },
        };

        let exchange = match mode {
            TradeMode::Live => ExchangeConfig {
                base_url: MAINNET_BASE_URL.to_string(),
                api_key: lookup("BINANCE_API_KEY").unwrap_or_default(),
                api_secret: lookup("BINANCE_API_SECRET").unwrap_or_default(),
            },
            TradeMode::Paper => ExchangeConfig {
                base_url: TESTNET_BASE_URL.to_string(),
                api_key: lookup("BINANCE_TESTNET_API_KEY").unwrap_or_default(),
                api_secret: lookup("BINANCE_TESTNET_API_SECRET").unwrap_or_default(),
            },
        };

        let shared_token = lookup("HIKYAKU_SHARED_TOKEN").filter(|t| !t.is_empty());

        let default_symbol = lookup("HIKYAKU_DEFAULT_SYMBOL")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "BTCUSDT".to_string())
            .to_uppercase();

        let default_quote_qty =
            parse_or_default(&lookup, "HIKYAKU_DEFAULT_QUOTE_QTY", Decimal::from(50))?;

        let trading_enabled = lookup("HIKYAKU_TRADING_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        let email = match (
            lookup("HIKYAKU_EMAIL_USER").filter(|v| !v.is_empty()),
            lookup("HIKYAKU_EMAIL_PASS").filter(|v| !v.is_empty()),
            lookup("HIKYAKU_EMAIL_TO").filter(|v| !v.is_empty()),
        ) {
            (Some(user), Some(pass), Some(to)) => Some(EmailConfig { user, pass, to }),
            _ => None,
        };

        let server = ServerConfig {
            host: lookup("HIKYAKU_HOST")
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or_default(&lookup, "HIKYAKU_PORT", 8000)?,
        };

        Ok(Self {
            mode,
            exchange,
            shared_token,
            default_symbol,
            default_quote_qty,
            trading_enabled,
            email,
            server,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: TradeMode::Paper,
            exchange: ExchangeConfig {
                base_url: TESTNET_BASE_URL.to_string(),
                api_key: String::new(),
                api_secret: String::new(),
            },
            shared_token: None,
            default_symbol: "BTCUSDT".to_string(),
            default_quote_qty: Decimal::from(50),
            trading_enabled: true,
            email: None,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
        }
    }
}

/// 键存在则解析，不存在则取默认值。解析失败返回错误而不是吞掉。
fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(pairs: &[(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key| map.get(key).map(|v| (*v).to_string())
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.mode, TradeMode::Paper);
        assert_eq!(config.exchange.base_url, TESTNET_BASE_URL);
        assert_eq!(config.shared_token, None);
        assert_eq!(config.default_symbol, "BTCUSDT");
        assert_eq!(config.default_quote_qty, Decimal::from(50));
        assert!(config.trading_enabled);
        assert!(config.email.is_none());
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_empty_environment_matches_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.mode, TradeMode::Paper);
        assert_eq!(config.exchange.base_url, TESTNET_BASE_URL);
        assert_eq!(config.exchange.api_key, "");
        assert_eq!(config.shared_token, None);
        assert_eq!(config.default_symbol, "BTCUSDT");
        assert_eq!(config.default_quote_qty, Decimal::from(50));
        assert!(config.trading_enabled);
        assert!(config.email.is_none());
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_live_mode_selects_mainnet_credentials() {
        let lookup = lookup_from(&[
            ("HIKYAKU_MODE", "live"),
            ("BINANCE_API_KEY", "mainnet-key"),
            ("BINANCE_API_SECRET", "mainnet-secret"),
            ("BINANCE_TESTNET_API_KEY", "testnet-key"),
        ]);
        let config = AppConfig::from_lookup(lookup).unwrap();
        assert_eq!(config.mode, TradeMode::Live);
        assert_eq!(config.exchange.base_url, MAINNET_BASE_URL);
        assert_eq!(config.exchange.api_key, "mainnet-key");
        assert_eq!(config.exchange.api_secret, "mainnet-secret");
    }

    #[test]
    fn test_paper_mode_selects_testnet_credentials() {
        let lookup = lookup_from(&[
            ("HIKYAKU_MODE", "PAPER"),
            ("BINANCE_API_KEY", "mainnet-key"),
            ("BINANCE_TESTNET_API_KEY", "testnet-key"),
            ("BINANCE_TESTNET_API_SECRET", "testnet-secret"),
        ]);
        let config = AppConfig::from_lookup(lookup).unwrap();
        assert_eq!(config.mode, TradeMode::Paper);
        assert_eq!(config.exchange.base_url, TESTNET_BASE_URL);
        assert_eq!(config.exchange.api_key, "testnet-key");
        assert_eq!(config.exchange.api_secret, "testnet-secret");
    }

    #[test]
    fn test_unknown_mode_falls_back_to_paper() {
        let lookup = lookup_from(&[("HIKYAKU_MODE", "mainnet")]);
        let config = AppConfig::from_lookup(lookup).unwrap();
        assert_eq!(config.mode, TradeMode::Paper);
        assert_eq!(config.exchange.base_url, TESTNET_BASE_URL);
    }

    #[test]
    fn test_empty_shared_token_is_unset() {
        let lookup = lookup_from(&[("HIKYAKU_SHARED_TOKEN", "")]);
        let config = AppConfig::from_lookup(lookup).unwrap();
        assert_eq!(config.shared_token, None);

        let lookup = lookup_from(&[("HIKYAKU_SHARED_TOKEN", "s3cret")]);
        let config = AppConfig::from_lookup(lookup).unwrap();
        assert_eq!(config.shared_token.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_trading_enabled_only_for_literal_true() {
        let cases = [
            ("true", true),
            ("TRUE", true),
            ("True", true),
            ("false", false),
            ("1", false),
            ("yes", false),
            ("", false),
        ];
        for (raw, expected) in cases {
            let lookup = lookup_from(&[("HIKYAKU_TRADING_ENABLED", raw)]);
            let config = AppConfig::from_lookup(lookup).unwrap();
            assert_eq!(config.trading_enabled, expected, "raw value: {:?}", raw);
        }
    }

    #[test]
    fn test_email_requires_all_three_fields() {
        let lookup = lookup_from(&[
            ("HIKYAKU_EMAIL_USER", "bot@example.com"),
            ("HIKYAKU_EMAIL_PASS", "app-password"),
        ]);
        let config = AppConfig::from_lookup(lookup).unwrap();
        assert!(config.email.is_none());

        let lookup = lookup_from(&[
            ("HIKYAKU_EMAIL_USER", "bot@example.com"),
            ("HIKYAKU_EMAIL_PASS", "app-password"),
            ("HIKYAKU_EMAIL_TO", "owner@example.com"),
        ]);
        let config = AppConfig::from_lookup(lookup).unwrap();
        let email = config.email.unwrap();
        assert_eq!(email.user, "bot@example.com");
        assert_eq!(email.to, "owner@example.com");
    }

    #[test]
    fn test_default_symbol_is_uppercased() {
        let lookup = lookup_from(&[("HIKYAKU_DEFAULT_SYMBOL", "ethusdt")]);
        let config = AppConfig::from_lookup(lookup).unwrap();
        assert_eq!(config.default_symbol, "ETHUSDT");
    }

    #[test]
    fn test_invalid_quote_qty_is_rejected() {
        let lookup = lookup_from(&[("HIKYAKU_DEFAULT_QUOTE_QTY", "fifty")]);
        let err = AppConfig::from_lookup(lookup).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("HIKYAKU_DEFAULT_QUOTE_QTY"));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let lookup = lookup_from(&[("HIKYAKU_PORT", "eight thousand")]);
        let err = AppConfig::from_lookup(lookup).unwrap_err();
        assert!(err.to_string().contains("HIKYAKU_PORT"));
    }

    #[test]
    fn test_trade_mode_display() {
        assert_eq!(TradeMode::Live.to_string(), "live");
        assert_eq!(TradeMode::Paper.to_string(), "paper");
    }
}
