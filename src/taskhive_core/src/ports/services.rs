use async_trait::async_trait;

use crate::domain::{email::Email, token::TokenCode, user::UserName};

/// Outbound transactional e-mail transport. Dispatch is best effort;
/// callers decide whether a failure is surfaced or only logged.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

/// Account-lifecycle messages: confirmation codes and password-reset
/// codes. Implementations render the message and hand it to an
/// [`EmailClient`].
#[async_trait]
pub trait AccountNotifier: Send + Sync {
    async fn send_confirmation_email(
        &self,
        recipient: &Email,
        name: &UserName,
        code: &TokenCode,
    ) -> Result<(), String>;

    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        name: &UserName,
        code: &TokenCode,
    ) -> Result<(), String>;
}
