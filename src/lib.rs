//! # TaskHive - Task Management Service Library
//!
//! This is a facade crate that re-exports all public APIs from the taskhive
//! service components. Use this crate to get access to the whole backend in
//! one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `Project`, `Task`, etc.
//! - **Repository traits**: `UserStore`, `TokenStore`, `ProjectStore`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `TasksUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `RedisTokenStore`, `PostmarkEmailClient`, etc.
//! - **Service**: `TaskhiveService` - the assembled HTTP service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use taskhive_core::*;
}

// Re-export most commonly used core types at the root level
pub use taskhive_core::{
    Email, Note, NoteId, Password, Project, ProjectId, StatusChange, Task, TaskId, TaskStatus,
    TokenCode, User, UserId, UserName, VerificationToken,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use taskhive_core::{
        ProjectStore, ProjectStoreError, TokenStore, TokenStoreError, UserStore, UserStoreError,
    };
}

// Re-export repository traits at root level
pub use taskhive_core::{
    AccountNotifier, EmailClient, ProjectStore, ProjectStoreError, TokenStore, TokenStoreError,
    UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use taskhive_application::*;
}

// Re-export use cases at root level
pub use taskhive_application::{
    ChangePasswordUseCase, CheckPasswordUseCase, ForgotPasswordUseCase, LoginUseCase,
    NotesUseCase, ProjectsUseCase, RegisterUseCase, RequestCodeUseCase, ResetPasswordUseCase,
    TasksUseCase, TeamUseCase, UpdateProfileUseCase, ValidateTokenUseCase, VerifyAccountUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP routes, state, and the access-gate extractor
    pub mod http {
        pub use taskhive_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use taskhive_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use taskhive_adapters::email::*;
    }

    /// JWT authentication utilities
    pub mod auth {
        pub use taskhive_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use taskhive_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use taskhive_adapters::{
    AuthEmailNotifier, HashMapProjectStore, HashMapTokenStore, HashMapUserStore, JwtConfig,
    MockEmailClient, PostgresProjectStore, PostgresUserStore, PostmarkEmailClient,
    RedisTokenStore,
};

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

/// The assembled HTTP service
pub use taskhive_service::TaskhiveService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
