use thiserror::Error;

/// # Summary
/// 通知信道错误枚举。所有变体在调用侧只记录日志，不向上传播。
#[derive(Error, Debug)]
pub enum NotifyError {
    /// 网络连接或 SMTP 会话错误
    #[error("Network error: {0}")]
    Network(String),

    /// 配置错误（收发件地址不合法等）
    #[error("Configuration error: {0}")]
    Config(String),

    /// 消息组装或信道侧拒收
    #[error("Platform error: {0}")]
    Platform(String),
}
