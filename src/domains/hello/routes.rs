// Hello domain routes
use axum::{routing::get, Router};
use crate::domains::hello::handlers::hello_handler;
use crate::shared::services::AppState;

pub fn create_hello_router() -> Router<AppState> {
    Router::new().route("/hello/", get(hello_handler::hello))
}
