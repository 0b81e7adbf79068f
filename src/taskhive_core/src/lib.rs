pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    note::{Note, NoteId},
    password::{Password, PasswordError},
    project::{Project, ProjectId},
    task::{StatusChange, Task, TaskId, TaskStatus},
    token::{TokenCode, TokenError, VerificationToken},
    user::{NewUser, User, UserId, UserName, UserNameError},
};

pub use ports::{
    repositories::{
        ProjectStore, ProjectStoreError, TokenStore, TokenStoreError, UserStore, UserStoreError,
    },
    services::{AccountNotifier, EmailClient},
};
