use async_trait::async_trait;
use hikyaku_core::notify::error::NotifyError;
use hikyaku_core::notify::port::Notifier;
use lettre::message::{Message, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

/// Fixed relay host. `relay()` connects to the submissions port 465 with
/// implicit TLS.
const SMTP_RELAY_HOST: &str = "smtp.gmail.com";

/// # Summary
/// A notifier that delivers order execution reports via SMTP.
///
/// # Invariants
/// - The sender address doubles as the SMTP login user.
/// - The `AsyncSmtpTransport` is reused across notifications; no connection
///   is opened until the first send.
pub struct EmailNotifier {
    /// The asynchronous SMTP transport.
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    /// Sender address (also the authenticated user).
    from: String,
    /// Recipient address.
    to: String,
}

impl EmailNotifier {
    /// # Summary
    /// Creates a new `EmailNotifier` against the fixed relay.
    ///
    /// # Arguments
    /// * `user` - The SMTP login, used verbatim as the sender address.
    /// * `pass` - The SMTP password or app-specific password.
    /// * `to` - The recipient address for every report.
    ///
    /// # Returns
    /// * A new instance of `EmailNotifier` or `NotifyError`.
    pub fn new(user: &str, pass: &str, to: &str) -> Result<Self, NotifyError> {
        let creds = Credentials::new(user.to_string(), pass.to_string());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(SMTP_RELAY_HOST)
            .map_err(|e| NotifyError::Config(format!("Invalid SMTP host: {}", e)))?
            .credentials(creds)
            .build();

        Ok(Self {
            mailer,
            from: user.to_string(),
            to: to.to_string(),
        })
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    /// # Summary
    /// Sends one plain-text report email.
    ///
    /// # Logic
    /// 1. Parses sender and recipient addresses (config errors surface here,
    ///    before any network traffic).
    /// 2. Builds the message with the subject and a text/plain body.
    /// 3. Awaits the SMTP delivery; no timeout and no retry.
    ///
    /// # Returns
    /// * `Ok(())` if the relay accepted the message.
    /// * `Err(NotifyError)` on address, build or SMTP failures.
    async fn notify(&self, subject: &str, content: &str) -> Result<(), NotifyError> {
        let email = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| NotifyError::Config(format!("Invalid from address: {}", e)))?,
            )
            .to(self
                .to
                .parse()
                .map_err(|e| NotifyError::Config(format!("Invalid to address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(content.to_string())
            .map_err(|e| NotifyError::Platform(format!("Failed to build email: {}", e)))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| NotifyError::Network(format!("SMTP error: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_sender_address_is_config_error() {
        let notifier = EmailNotifier::new("not an address", "pass", "owner@example.com")
            .expect("transport construction should not touch the network");
        let err = notifier
            .notify("BUY executed BTCUSDT", "body")
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Config(_)), "got: {:?}", err);
    }

    #[tokio::test]
    async fn test_invalid_recipient_address_is_config_error() {
        let notifier = EmailNotifier::new("bot@example.com", "pass", "not an address")
            .expect("transport construction should not touch the network");
        let err = notifier
            .notify("SELL FAILED", "Exchange rejected request")
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Config(_)), "got: {:?}", err);
    }
}
