//! # `hikyaku-api` - HTTP API 网关
//!
//! 本 crate 是 Hikyaku 订单中继服务的 HTTP/REST 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收来自 TradingView 等信号源的 Webhook HTTP 请求
//! - 校验共享令牌后解析并规范化交易信号
//! - 调用下层 `ExchangePort` 查询余额并提交市价单
//! - 通过 `Notifier` 发送成交 / 失败邮件，将交易所回执原样返回给调用方

pub mod auth;
pub mod error;
pub mod routes;
pub mod server;
pub mod types;
