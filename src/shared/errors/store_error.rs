use thiserror::Error;

/// 저장소(User / Token Store) 에러
/// Errors surfaced by the user and token stores
#[derive(Error, Debug)]
pub enum StoreError {
    /// 이메일 중복 (unique 제약)
    /// Email uniqueness violated at creation
    #[error("Email already exists: {email}")]
    DuplicateEmail { email: String },

    /// 사용자를 찾을 수 없음
    /// User not found
    #[error("User not found: id={id}")]
    UserNotFound { id: u64 },

    /// 백엔드(DB 등) 에러
    /// Backend failure (database, etc.)
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}
