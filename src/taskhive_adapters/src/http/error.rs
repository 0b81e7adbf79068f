use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use taskhive_application::{
    AccessError, ChangePasswordError, CheckPasswordError, ForgotPasswordError, LoginError,
    NotesError, ProjectsError, RegisterError, RequestCodeError, ResetPasswordError, TasksError,
    TeamError, UpdateProfileError, ValidateTokenError, VerifyAccountError,
};
use taskhive_core::{
    EmailError, PasswordError, ProjectStoreError, TokenError, TokenStoreError, UserNameError,
    UserStoreError,
};
use thiserror::Error;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// The API-facing error taxonomy. Every failure leaves the service as
/// one of these; internal detail never reaches the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Something went wrong.")]
    Unexpected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, self.to_string()),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),
            ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Unexpected(detail) => {
                tracing::error!(%detail, "request failed unexpectedly");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

// Domain validation failures are all bad requests.

impl From<EmailError> for ApiError {
    fn from(error: EmailError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<UserNameError> for ApiError {
    fn from(error: UserNameError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

// Port-level errors carry their generic messages.

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => ApiError::Conflict("User already exists.".into()),
            UserStoreError::UserNotFound => ApiError::NotFound("User not found.".into()),
            UserStoreError::IncorrectPassword => {
                ApiError::Unauthorized("Incorrect password".into())
            }
            UserStoreError::UnexpectedError(detail) => ApiError::Unexpected(detail),
        }
    }
}

impl From<TokenStoreError> for ApiError {
    fn from(error: TokenStoreError) -> Self {
        match error {
            TokenStoreError::TokenNotFound => ApiError::NotFound("Invalid token".into()),
            TokenStoreError::UnexpectedError(detail) => ApiError::Unexpected(detail),
        }
    }
}

impl From<ProjectStoreError> for ApiError {
    fn from(error: ProjectStoreError) -> Self {
        match error {
            ProjectStoreError::ProjectNotFound => ApiError::NotFound("Project not found".into()),
            ProjectStoreError::TaskNotFound => ApiError::NotFound("Task not found".into()),
            ProjectStoreError::NoteNotFound => ApiError::NotFound("Note not found".into()),
            ProjectStoreError::AlreadyTeamMember => {
                ApiError::Conflict("User is already assigned to this project".into())
            }
            ProjectStoreError::NotTeamMember => {
                ApiError::NotFound("User not found in this project".into())
            }
            ProjectStoreError::UnexpectedError(detail) => ApiError::Unexpected(detail),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(error: AccessError) -> Self {
        match error {
            AccessError::ProjectNotFound => ApiError::NotFound("Project not found".into()),
            AccessError::Forbidden => ApiError::Forbidden("Invalid action".into()),
            AccessError::UnexpectedError(detail) => ApiError::Unexpected(detail),
        }
    }
}

// Use-case errors pick up their flow-specific wording.

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<VerifyAccountError> for ApiError {
    fn from(error: VerifyAccountError) -> Self {
        match error {
            VerifyAccountError::TokenStoreError(e) => e.into(),
            VerifyAccountError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::UserNotFound => ApiError::NotFound(error.to_string()),
            LoginError::AccountNotConfirmed => ApiError::Unauthorized(error.to_string()),
            LoginError::IncorrectPassword => ApiError::Unauthorized(error.to_string()),
            LoginError::UserStoreError(e) => e.into(),
            LoginError::TokenStoreError(e) => e.into(),
        }
    }
}

impl From<RequestCodeError> for ApiError {
    fn from(error: RequestCodeError) -> Self {
        match error {
            RequestCodeError::AlreadyConfirmed => ApiError::Forbidden(error.to_string()),
            RequestCodeError::UserStoreError(UserStoreError::UserNotFound) => {
                ApiError::NotFound("User hasn't been registered.".into())
            }
            RequestCodeError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ForgotPasswordError> for ApiError {
    fn from(error: ForgotPasswordError) -> Self {
        match error {
            ForgotPasswordError::UserStoreError(UserStoreError::UserNotFound) => {
                ApiError::NotFound("User hasn't been registered.".into())
            }
            ForgotPasswordError::UserStoreError(e) => e.into(),
            ForgotPasswordError::TokenStoreError(e) => e.into(),
        }
    }
}

impl From<ValidateTokenError> for ApiError {
    fn from(error: ValidateTokenError) -> Self {
        match error {
            ValidateTokenError::TokenStoreError(e) => e.into(),
        }
    }
}

impl From<ResetPasswordError> for ApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::TokenStoreError(e) => e.into(),
            ResetPasswordError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<UpdateProfileError> for ApiError {
    fn from(error: UpdateProfileError) -> Self {
        match error {
            UpdateProfileError::UserStoreError(UserStoreError::UserAlreadyExists) => {
                ApiError::Conflict("This email is already registered.".into())
            }
            UpdateProfileError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ChangePasswordError> for ApiError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::IncorrectCurrentPassword => {
                ApiError::Unauthorized(error.to_string())
            }
            ChangePasswordError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<CheckPasswordError> for ApiError {
    fn from(error: CheckPasswordError) -> Self {
        match error {
            CheckPasswordError::IncorrectPassword => ApiError::Unauthorized(error.to_string()),
            CheckPasswordError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ProjectsError> for ApiError {
    fn from(error: ProjectsError) -> Self {
        match error {
            ProjectsError::Access(e) => e.into(),
            ProjectsError::Store(e) => e.into(),
        }
    }
}

impl From<TasksError> for ApiError {
    fn from(error: TasksError) -> Self {
        match error {
            TasksError::Access(e) => e.into(),
            TasksError::Store(e) => e.into(),
        }
    }
}

impl From<TeamError> for ApiError {
    fn from(error: TeamError) -> Self {
        match error {
            TeamError::Access(e) => e.into(),
            TeamError::UserStoreError(UserStoreError::UserNotFound) => {
                ApiError::NotFound("User not found".into())
            }
            TeamError::UserStoreError(e) => e.into(),
            TeamError::Store(e) => e.into(),
        }
    }
}

impl From<NotesError> for ApiError {
    fn from(error: NotesError) -> Self {
        match error {
            NotesError::Access(e) => e.into(),
            NotesError::NotNoteAuthor => ApiError::Forbidden(error.to_string()),
            NotesError::Store(e) => e.into(),
        }
    }
}
