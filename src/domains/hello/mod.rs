// Hello domain module
pub mod handlers;
pub mod models;
pub mod routes;

pub use models::*;
pub use routes::*;
