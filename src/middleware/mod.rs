pub mod auth;

pub use auth::{extract_bearer_token, session_auth_middleware};
