// Auth domain handlers
pub mod auth_handler;
pub mod profile_handler;
