use thiserror::Error;

/// # Summary
/// 交易所适配器错误枚举。任何变体到达 HTTP 层都映射为 500，
/// 并触发一封失败通知邮件，错误原文进入响应体。
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// 网络连接或传输错误
    #[error("Network error: {0}")]
    Network(String),

    /// 交易所以非 2xx 拒绝请求，附带响应体原文
    #[error("Exchange rejected request: {0}")]
    Rejected(String),

    /// 响应体无法按预期结构解析
    #[error("Malformed exchange response: {0}")]
    Parse(String),

    /// 请求签名失败（密钥不可用等）
    #[error("Signing error: {0}")]
    Signature(String),
}
