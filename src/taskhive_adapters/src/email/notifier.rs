use askama::Template;
use taskhive_core::{AccountNotifier, Email, EmailClient, TokenCode, UserName};

#[derive(Template)]
#[template(path = "confirm_account.html")]
struct ConfirmAccountTemplate<'a> {
    name: &'a str,
    code: &'a str,
    frontend_url: &'a str,
}

#[derive(Template)]
#[template(path = "reset_password.html")]
struct ResetPasswordTemplate<'a> {
    name: &'a str,
    code: &'a str,
    frontend_url: &'a str,
}

/// Renders the account-lifecycle messages and hands them to the
/// transport. Links point at the front end; the code itself is typed in
/// there by the user.
pub struct AuthEmailNotifier<E> {
    email_client: E,
    frontend_url: String,
}

impl<E> AuthEmailNotifier<E> {
    pub fn new(email_client: E, frontend_url: String) -> Self {
        Self {
            email_client,
            frontend_url,
        }
    }
}

#[async_trait::async_trait]
impl<E: EmailClient> AccountNotifier for AuthEmailNotifier<E> {
    #[tracing::instrument(name = "Sending confirmation email", skip_all)]
    async fn send_confirmation_email(
        &self,
        recipient: &Email,
        name: &UserName,
        code: &TokenCode,
    ) -> Result<(), String> {
        let body = ConfirmAccountTemplate {
            name: name.as_str(),
            code: code.as_str(),
            frontend_url: &self.frontend_url,
        }
        .render()
        .map_err(|e| e.to_string())?;

        self.email_client
            .send_email(recipient, "TaskHive - Verify your account", &body)
            .await
    }

    #[tracing::instrument(name = "Sending password reset email", skip_all)]
    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        name: &UserName,
        code: &TokenCode,
    ) -> Result<(), String> {
        let body = ResetPasswordTemplate {
            name: name.as_str(),
            code: code.as_str(),
            frontend_url: &self.frontend_url,
        }
        .render()
        .map_err(|e| e.to_string())?;

        self.email_client
            .send_email(recipient, "TaskHive - Reset your password", &body)
            .await
    }
}
