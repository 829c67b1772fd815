use carelink_core::{Email, EmailClient};

/// Email client that drops everything on the floor. Used by tests and as
/// the fallback when no delivery provider is configured.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient;

impl MockEmailClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        _recipient: &Email,
        subject: &str,
        _content: &str,
    ) -> Result<(), String> {
        tracing::debug!(subject, "email delivery disabled; dropping message");
        Ok(())
    }
}
