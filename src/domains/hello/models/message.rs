use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use utoipa::ToSchema;

/// 인사 메시지 응답
/// Greeting response with the server time
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = HelloResponse)]
pub struct HelloResponse {
    #[schema(example = "Hello!")]
    pub message: String,

    pub timestamp: DateTime<Utc>,
}
