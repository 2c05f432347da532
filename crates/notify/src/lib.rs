//! # `hikyaku-notify` - 通知适配器
//!
//! 实现 `hikyaku-core` 的 [`Notifier`](hikyaku_core::notify::port::Notifier) 端口：
//! - [`email::EmailNotifier`]：经 SMTPS 发送订单执行报告
//! - [`noop::NoopNotifier`]：邮件未配置时的占位实现

pub mod email;
pub mod noop;
