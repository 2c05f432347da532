use anyhow::Context;
use hikyaku_core::exchange::port::ExchangePort;
use hikyaku_exchange::binance::BinanceSpotClient;
use std::env;

/// # Summary
/// 集成测试：用测试网凭证拉取真实账户余额。
///
/// # Logic
/// 1. 加载 .env 环境变量。
/// 2. 读取测试网凭证并构建客户端。
/// 3. 拉取余额快照，断言请求成功且至少包含一个资产。
#[tokio::test]
#[ignore] // 默认忽略，需要测试网凭证
async fn test_testnet_account_balances() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let api_key = env::var("BINANCE_TESTNET_API_KEY").context("BINANCE_TESTNET_API_KEY must be set")?;
    let api_secret =
        env::var("BINANCE_TESTNET_API_SECRET").context("BINANCE_TESTNET_API_SECRET must be set")?;

    let client = BinanceSpotClient::new("https://testnet.binance.vision", &api_key, &api_secret);
    let balances = client.get_balances().await?;

    assert!(
        !balances.is_empty(),
        "testnet account should report at least one asset"
    );
    Ok(())
}

/// # Summary
/// 集成测试：无效凭证必须以 Rejected 透传交易所的拒绝原文。
///
/// # Logic
/// 1. 用伪造凭证构建客户端。
/// 2. 拉取余额，断言返回 Rejected 且带有交易所错误文案。
#[tokio::test]
#[ignore] // 默认忽略，需要外网连通性
async fn test_invalid_credentials_are_rejected() {
    let client = BinanceSpotClient::new("https://testnet.binance.vision", "bogus-key", "bogus-secret");
    let err = client.get_balances().await.unwrap_err();
    let text = err.to_string();
    assert!(
        text.contains("Exchange rejected request"),
        "unexpected error: {}",
        text
    );
}
