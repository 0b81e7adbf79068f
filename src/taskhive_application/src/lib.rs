pub mod access;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use access::{AccessError, AccessLevel};

pub use use_cases::{
    change_password::{ChangePasswordError, ChangePasswordUseCase},
    check_password::{CheckPasswordError, CheckPasswordUseCase},
    forgot_password::{ForgotPasswordError, ForgotPasswordUseCase},
    login::{LoginError, LoginUseCase},
    notes::{NotesError, NotesUseCase},
    projects::{ProjectsError, ProjectsUseCase},
    register::{RegisterError, RegisterUseCase},
    request_code::{RequestCodeError, RequestCodeUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    tasks::{TasksError, TasksUseCase},
    team::{TeamError, TeamUseCase},
    update_profile::{UpdateProfileError, UpdateProfileUseCase},
    validate_token::{ValidateTokenError, ValidateTokenUseCase},
    verify_account::{VerifyAccountError, VerifyAccountUseCase},
};
