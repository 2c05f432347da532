//! 通知领域：订单执行结果的尽力送达端口。

pub mod error;
pub mod port;
