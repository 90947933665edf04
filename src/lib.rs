//! Token-based authentication API: registration, login, logout with refresh
//! token blacklisting, and the caller's own profile.

pub mod domains;
pub mod openapi;
pub mod routes;
pub mod shared;

pub use routes::{create_app, create_router};
pub use shared::config::AppConfig;
pub use shared::services::AppState;
