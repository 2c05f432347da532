use crate::notify::error::NotifyError;
use async_trait::async_trait;

/// # Summary
/// 订单执行结果的通知端口。成交与失败各发一封，内容为纯文本摘要。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync` 以支持并发调用。
/// - 通知是尽力而为的旁路：调用方记录 `Err` 后继续走原响应路径，
///   送达失败绝不改变 HTTP 结果。
#[async_trait]
pub trait Notifier: Send + Sync {
    /// # Summary
    /// 发送一条带主题的纯文本通知。
    ///
    /// # Logic
    /// 1. 将主题与正文组装为底层信道的消息格式。
    /// 2. 同步等待信道送达结果（不设超时，不重试）。
    ///
    /// # Arguments
    /// * `subject` - 主题行，如 `BUY executed BTCUSDT` 或 `SELL FAILED`。
    /// * `content` - 纯文本正文（订单摘要或错误原文）。
    ///
    /// # Returns
    /// * 成功返回 `Ok(())`。
    /// * 失败返回 `Err(NotifyError)`，由调用方记录并吞掉。
    async fn notify(&self, subject: &str, content: &str) -> Result<(), NotifyError>;
}
