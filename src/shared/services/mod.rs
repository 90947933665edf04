// Shared services
pub mod app_state;
pub mod token_cleanup;

pub use app_state::*;
pub use token_cleanup::*;
