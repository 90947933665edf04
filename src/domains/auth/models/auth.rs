use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::domains::auth::models::user::UserResponse;

// 회원가입 요청 모델
// 모든 필드는 Option: 누락된 필드는 역직렬화 실패가 아니라 필드 에러로 보고됨
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[schema(as = RegisterRequest)]
pub struct RegisterRequest {
    /// Email address
    /// 이메일 주소
    #[schema(example = "user@example.com")]
    #[serde(default)]
    pub email: Option<String>,

    /// Password (will be hashed)
    /// 비밀번호 (해싱됨)
    #[schema(example = "s3cure-passw0rd")]
    #[serde(default)]
    pub password: Option<String>,

    /// Password confirmation (optional, must match when given)
    /// 비밀번호 확인 (선택사항)
    #[schema(example = "s3cure-passw0rd")]
    #[serde(default)]
    pub password_confirm: Option<String>,

    /// Username (optional)
    /// 사용자명 (선택사항)
    #[schema(example = "johndoe")]
    #[serde(default)]
    pub username: Option<String>,

    #[schema(example = "John")]
    #[serde(default)]
    pub first_name: Option<String>,

    #[schema(example = "Doe")]
    #[serde(default)]
    pub last_name: Option<String>,
}

// 로그인 요청 모델
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[schema(as = LoginRequest)]
pub struct LoginRequest {
    /// Email address
    /// 이메일 주소
    #[schema(example = "user@example.com")]
    #[serde(default)]
    pub email: Option<String>,

    /// Password
    /// 비밀번호
    #[schema(example = "s3cure-passw0rd")]
    #[serde(default)]
    pub password: Option<String>,
}

// 회원가입 / 로그인 응답 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = AuthResponse)]
pub struct AuthResponse {
    /// User information (without password)
    /// 사용자 정보 (비밀번호 제외)
    pub user: UserResponse,

    /// JWT Access Token (짧은 수명)
    /// JWT Access Token (short lifetime)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access: String,

    /// JWT Refresh Token (긴 수명, 블랙리스트 가능)
    /// JWT Refresh Token (long lifetime, revocable)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh: String,

    /// Success message
    /// 성공 메시지
    pub message: String,
}

// 로그아웃 요청 모델
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[schema(as = LogoutRequest)]
pub struct LogoutRequest {
    /// Refresh Token to blacklist (optional)
    /// 블랙리스트에 등록할 리프레시 토큰 (선택사항)
    ///
    /// 원시 JSON 값으로 받음: 문자열이 아닌 값은 핸들러에서 잘못된 토큰으로 처리
    #[schema(value_type = Option<String>, example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    #[serde(default)]
    pub refresh: Option<serde_json::Value>,
}

// 토큰 갱신 요청 모델
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[schema(as = TokenRefreshRequest)]
pub struct TokenRefreshRequest {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    #[serde(default)]
    pub refresh: Option<String>,
}

// 토큰 갱신 응답 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = TokenRefreshResponse)]
pub struct TokenRefreshResponse {
    /// 새 Access Token
    /// New Access Token
    pub access: String,

    /// Refresh Token (rotated when rotation is enabled)
    pub refresh: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = MessageResponse)]
pub struct MessageResponse {
    #[schema(example = "Logout successful")]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = ErrorResponse)]
pub struct ErrorResponse {
    #[schema(example = "Invalid email or password")]
    pub error: String,
}
