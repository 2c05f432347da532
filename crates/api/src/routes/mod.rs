//! # 路由控制器集合
//!
//! 每个子模块对应一个 REST 资源，handler 均通过 `utoipa::path`
//! 宏登记进 OpenAPI 文档。

pub mod health;
pub mod webhook;
