//! 信号领域：外部信号字段的规范化规则与校验错误。

pub mod entity;
pub mod error;
