use async_trait::async_trait;
use hikyaku_core::notify::error::NotifyError;
use hikyaku_core::notify::port::Notifier;
use tracing::warn;

/// # Summary
/// 邮件配置不全时装配的空通知器：对每次发送记一条告警后直接成功。
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, subject: &str, _content: &str) -> Result<(), NotifyError> {
        warn!("Email not configured, skipping notification: {}", subject);
        Ok(())
    }
}
