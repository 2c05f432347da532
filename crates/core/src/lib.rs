//! # `hikyaku-core` - 领域核心
//!
//! 本 crate 是 Hikyaku 信号中继的领域核心层，不包含任何 IO 实现。
//! 定义配置快照、信号与订单实体、以及交易所 / 通知两个出站端口。
//!
//! ## 架构职责
//! - 解析环境变量并固化为不可变的 [`config::AppConfig`]
//! - 将外部信号字段规范化为强类型的 [`signal::Signal`]
//! - 通过 `async_trait` 端口隔离 Binance REST 与 SMTP 适配器
//! - 按领域划分 `thiserror` 错误枚举，供上层映射为 HTTP 状态码

pub mod config;
pub mod exchange;
pub mod notify;
pub mod signal;
