use crate::domains::hello::models::HelloResponse;
use axum::Json;
use chrono::Utc;

// 헬스 체크 겸 인사 핸들러 (인증 불필요)
#[utoipa::path(
    get,
    path = "/hello/",
    responses(
        (status = 200, description = "Greeting with server timestamp", body = HelloResponse)
    ),
    tag = "Hello"
)]
pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello!".to_string(),
        timestamp: Utc::now(),
    })
}
