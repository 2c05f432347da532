//! # 共享令牌鉴权
//!
//! Webhook 信号源 (如 TradingView) 无法携带自定义 Header，
//! 因此鉴权采用单一共享令牌：正文 `token` 字段优先，查询参数 `?token=` 兜底。
//! 服务端未配置令牌时拒绝一切请求。

/// 从正文与查询参数中提取调用方出示的令牌
///
/// # Logic
/// 1. 正文字段优先于查询参数
/// 2. 空字符串视同未提供
pub fn presented_token(body_token: Option<&str>, query_token: Option<&str>) -> Option<String> {
    body_token
        .filter(|t| !t.is_empty())
        .or_else(|| query_token.filter(|t| !t.is_empty()))
        .map(str::to_owned)
}

/// 校验出示的令牌是否与服务端配置一致
///
/// # Invariants
/// - 服务端未配置令牌 (None) 时恒为 false，不存在"免鉴权"模式
/// - 比较为精确匹配，大小写敏感
pub fn token_matches(shared: Option<&str>, presented: Option<&str>) -> bool {
    match (shared, presented) {
        (Some(expected), Some(given)) => expected == given,
        _ => false,
    }
}

// ============================================================
//  单元测试
// ============================================================
