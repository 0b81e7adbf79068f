use std::sync::Arc;

use taskhive_core::{Email, EmailClient};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub recipient: Email,
    pub subject: String,
    pub content: String,
}

/// Email client for tests: records every message instead of sending it,
/// so a test can fish the verification code back out of the "inbox".
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent_messages(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }

    pub async fn last_message_to(&self, recipient: &Email) -> Option<SentEmail> {
        self.sent
            .read()
            .await
            .iter()
            .rev()
            .find(|message| &message.recipient == recipient)
            .cloned()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        self.sent.write().await.push(SentEmail {
            recipient: recipient.clone(),
            subject: subject.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}
