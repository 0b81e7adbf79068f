use taskhive_core::{TokenCode, TokenStore, TokenStoreError};

#[derive(Debug, thiserror::Error)]
pub enum ValidateTokenError {
    #[error("Token store error: {0}")]
    TokenStoreError(#[from] TokenStoreError),
}

/// Check that a reset code exists without consuming it, so the front end
/// can show the new-password form before the actual reset request.
pub struct ValidateTokenUseCase<'a, T>
where
    T: TokenStore + ?Sized,
{
    token_store: &'a T,
}

impl<'a, T> ValidateTokenUseCase<'a, T>
where
    T: TokenStore + ?Sized,
{
    pub fn new(token_store: &'a T) -> Self {
        Self { token_store }
    }

    #[tracing::instrument(name = "ValidateTokenUseCase::execute", skip(self))]
    pub async fn execute(&self, code: TokenCode) -> Result<(), ValidateTokenError> {
        self.token_store.find_token(&code).await?;
        Ok(())
    }
}
