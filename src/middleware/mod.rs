pub mod auth;

pub use auth::{bearer_auth, optional_user, require_admin, AuthUser};
