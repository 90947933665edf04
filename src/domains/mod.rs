// Domains module
pub mod auth;
pub mod hello;
