// Database module: connection pool, store traits and their implementations
pub mod connection;
pub mod memory;
pub mod repositories;
pub mod stores;

pub use connection::*;
pub use memory::*;
pub use repositories::*;
pub use stores::*;
