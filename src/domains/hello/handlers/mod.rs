// Hello domain handlers
pub mod hello_handler;
