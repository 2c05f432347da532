//! 交易所领域：订单实体、出站端口与错误定义。

pub mod entity;
pub mod error;
pub mod port;
