//! # `hikyaku-exchange` - Binance 现货适配器
//!
//! 实现 `hikyaku-core` 的 [`ExchangePort`](hikyaku_core::exchange::port::ExchangePort)：
//! HMAC-SHA256 查询串签名、账户余额拉取与市价单提交。
//! 主网与测试网共用同一实现，仅入口 URL 与凭证不同。

pub mod binance;
