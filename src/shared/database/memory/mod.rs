// In-memory stores
pub mod user_store;
pub mod token_store;

pub use user_store::*;
pub use token_store::*;
