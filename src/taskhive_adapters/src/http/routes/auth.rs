use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use taskhive_application::{
    ChangePasswordUseCase, CheckPasswordUseCase, ForgotPasswordUseCase, LoginUseCase,
    RegisterUseCase, RequestCodeUseCase, ResetPasswordUseCase, UpdateProfileUseCase,
    ValidateTokenUseCase, VerifyAccountUseCase,
};
use taskhive_core::{Email, Password, TokenCode, UserName};

use crate::auth::jwt::generate_auth_token;

use super::super::{
    error::ApiError, extract::AuthenticatedUser, responses::UserResponse, state::AppState,
};

fn check_password_confirmation(
    password: &Secret<String>,
    confirmation: &Secret<String>,
) -> Result<(), ApiError> {
    if password.expose_secret() != confirmation.expose_secret() {
        return Err(ApiError::InvalidInput("Passwords don't match".into()));
    }
    Ok(())
}

#[derive(Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub email: String,
    pub password: Secret<String>,
    pub password_confirmation: Secret<String>,
}

#[tracing::instrument(name = "Create account", skip_all)]
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    check_password_confirmation(&request.password, &request.password_confirmation)?;
    let name = UserName::parse(&request.name)?;
    let email = Email::parse(&request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = RegisterUseCase::new(
        state.user_store.as_ref(),
        state.token_store.as_ref(),
        state.notifier.as_ref(),
    );
    use_case.execute(name, email, password).await?;

    Ok((
        StatusCode::CREATED,
        String::from("Account created. Check your email to verify it."),
    ))
}

#[derive(Deserialize)]
pub struct VerifyAccountRequest {
    pub token: String,
}

#[tracing::instrument(name = "Verify account", skip_all)]
pub async fn verify_account(
    State(state): State<AppState>,
    Json(request): Json<VerifyAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let code = TokenCode::parse(&request.token)?;

    let use_case = VerifyAccountUseCase::new(state.user_store.as_ref(), state.token_store.as_ref());
    use_case.execute(code).await?;

    Ok(String::from("Account verified successfully"))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = Email::parse(&request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = LoginUseCase::new(
        state.user_store.as_ref(),
        state.token_store.as_ref(),
        state.notifier.as_ref(),
    );
    let user = use_case.execute(email, password).await?;

    // The bearer credential is the whole response body.
    let token = generate_auth_token(user.id(), &state.jwt)
        .map_err(|e| ApiError::Unexpected(e.to_string()))?;
    Ok(token)
}

#[derive(Deserialize)]
pub struct RequestCodeRequest {
    pub email: String,
}

#[tracing::instrument(name = "Request confirmation code", skip_all)]
pub async fn request_code(
    State(state): State<AppState>,
    Json(request): Json<RequestCodeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = Email::parse(&request.email)?;

    let use_case = RequestCodeUseCase::new(
        state.user_store.as_ref(),
        state.token_store.as_ref(),
        state.notifier.as_ref(),
    );
    use_case.execute(email).await?;

    Ok(String::from("We've sent a new token to your e-mail."))
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = Email::parse(&request.email)?;

    let use_case = ForgotPasswordUseCase::new(
        state.user_store.as_ref(),
        state.token_store.as_ref(),
        state.notifier.as_ref(),
    );
    use_case.execute(email).await?;

    Ok(String::from("We've sent a new token to your e-mail."))
}

#[derive(Deserialize)]
pub struct ValidateTokenRequest {
    pub token: String,
}

#[tracing::instrument(name = "Validate token", skip_all)]
pub async fn validate_token(
    State(state): State<AppState>,
    Json(request): Json<ValidateTokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let code = TokenCode::parse(&request.token)?;

    let use_case = ValidateTokenUseCase::new(state.token_store.as_ref());
    use_case.execute(code).await?;

    Ok(String::from("Valid token, write your new password."))
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub password: Secret<String>,
    pub password_confirmation: Secret<String>,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn update_password_with_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    check_password_confirmation(&request.password, &request.password_confirmation)?;
    let code = TokenCode::parse(&token)?;
    let password = Password::try_from(request.password)?;

    let use_case = ResetPasswordUseCase::new(state.user_store.as_ref(), state.token_store.as_ref());
    use_case.execute(code, password).await?;

    Ok(String::from("Password updated successfully."))
}

#[tracing::instrument(name = "Get me", skip_all)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
}

#[tracing::instrument(name = "Update profile", skip_all)]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = UserName::parse(&request.name)?;
    let email = Email::parse(&request.email)?;

    let use_case = UpdateProfileUseCase::new(state.user_store.as_ref());
    use_case.execute(user.id(), name, email).await?;

    Ok(String::from("Profile updated successfully"))
}

#[derive(Deserialize)]
pub struct UpdatePasswordRequest {
    pub current_password: Secret<String>,
    pub password: Secret<String>,
    pub password_confirmation: Secret<String>,
}

#[tracing::instrument(name = "Update password", skip_all)]
pub async fn update_password(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(request): Json<UpdatePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    check_password_confirmation(&request.password, &request.password_confirmation)?;
    // The current password only has to match what is stored; the length
    // rule applies to the new one.
    let current = Password::try_from(request.current_password)
        .map_err(|_| ApiError::Unauthorized("Current password is incorrect.".into()))?;
    let new_password = Password::try_from(request.password)?;

    let use_case = ChangePasswordUseCase::new(state.user_store.as_ref());
    use_case.execute(user.id(), current, new_password).await?;

    Ok(String::from("Password updated successfully"))
}

#[derive(Deserialize)]
pub struct CheckPasswordRequest {
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Check password", skip_all)]
pub async fn check_password(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(request): Json<CheckPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let password = Password::try_from(request.password)
        .map_err(|_| ApiError::Unauthorized("Password is incorrect.".into()))?;

    let use_case = CheckPasswordUseCase::new(state.user_store.as_ref());
    use_case.execute(user.id(), password).await?;

    Ok(String::from("Correct password"))
}
