pub mod error;
pub mod extract;
pub mod responses;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use extract::AuthenticatedUser;
pub use state::AppState;
