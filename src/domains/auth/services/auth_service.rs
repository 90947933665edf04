use std::sync::Arc;
use crate::shared::database::UserStore;
use crate::domains::auth::models::{
    LoginRequest, NewUser, ProfileChanges, ProfileUpdateRequest, RegisterRequest, TokenPair, User,
};
use crate::domains::auth::services::validation::{self, PasswordPolicy};
use crate::domains::auth::services::JwtService;
use crate::shared::errors::{AuthError, ValidationErrors};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use tokio::sync::OnceCell;

// 존재하지 않는 이메일 로그인 시 검증할 더미 비밀번호
const DUMMY_PASSWORD: &str = "dummy-password-for-timing";

// 인증 서비스
// AuthService: registration, login, logout, profile and request authentication
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt_service: JwtService,
    password_policy: PasswordPolicy,
    /// 처음 필요할 때 한 번만 계산
    dummy_hash: Arc<OnceCell<String>>,
}

impl AuthService {
    // 생성자: 저장소와 JWT Service 를 주입받음
    pub fn new(users: Arc<dyn UserStore>, jwt_service: JwtService, password_policy: PasswordPolicy) -> Self {
        Self {
            users,
            jwt_service,
            password_policy,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    // 회원가입 (비즈니스 로직)
    // Returns: (User, tokens)
    pub async fn register(&self, request: RegisterRequest) -> Result<(User, TokenPair), AuthError> {
        let mut errors = ValidationErrors::new();

        // 1. 입력값 검증 (모든 필드 에러를 모아서 반환)
        let email = validation::require("email", request.email.as_deref(), &mut errors)
            .map(validation::normalize_email);
        if let Some(email) = &email {
            validation::validate_email(email, &mut errors);
        }

        let password = validation::require("password", request.password.as_deref(), &mut errors);
        if let Some(password) = password {
            validation::validate_password(password, email.as_deref(), self.password_policy, &mut errors);
            if let Some(confirm) = request.password_confirm.as_deref() {
                if confirm != password {
                    errors.add("password_confirm", "Passwords do not match.");
                }
            }
        }

        let changes = ProfileUpdateRequest {
            username: Some(request.username),
            first_name: Some(request.first_name),
            last_name: Some(request.last_name),
        }
        .into_changes(true);
        let changes = Self::validate_profile(changes, &mut errors);

        // 2. 이메일 중복 확인 (형식이 올바른 경우에만)
        if let Some(email) = email.as_deref().filter(|_| !errors.contains("email")) {
            if self.users.get_user_by_email(email).await?.is_some() {
                errors.add("email", "user with this email already exists.");
            }
        }

        errors.into_result()?;
        let (Some(email), Some(password)) = (email, password) else {
            return Err(AuthError::Internal("validated registration is missing fields".to_string()));
        };

        // 3. 비밀번호 해싱
        let password_hash = Self::hash_password(password.to_string()).await?;

        // 4. 사용자 생성 (동시 가입은 저장소의 unique 제약이 막음)
        let user = self
            .users
            .create_user(NewUser {
                email,
                password_hash,
                username: changes.username.flatten(),
                first_name: changes.first_name.flatten(),
                last_name: changes.last_name.flatten(),
            })
            .await?;

        // 5. 토큰 발급
        let tokens = self.jwt_service.issue(user.id, &user.email).await?;
        tracing::info!(user_id = user.id, "User registered");

        Ok((user, tokens))
    }

    // 로그인 (비즈니스 로직)
    // 실패 사유(사용자 없음 / 비밀번호 불일치 / 비활성 계정)는 모두 동일한 에러
    pub async fn login(&self, request: LoginRequest) -> Result<(User, TokenPair), AuthError> {
        let mut errors = ValidationErrors::new();
        let email = validation::require("email", request.email.as_deref(), &mut errors);
        let password = validation::require("password", request.password.as_deref(), &mut errors);
        errors.into_result()?;
        let (Some(email), Some(password)) = (email, password) else {
            return Err(AuthError::Internal("validated login is missing fields".to_string()));
        };

        // 1. 이메일로 사용자 조회
        let user = match self.users.get_user_by_email(&validation::normalize_email(email)).await? {
            Some(u) => u,
            None => {
                // 응답 시간으로 계정 존재 여부가 드러나지 않도록 동일한 argon2 검증 수행
                self.verify_dummy_password(password).await?;
                tracing::warn!(reason = "unknown_email", "Login failed");
                return Err(AuthError::InvalidCredentials);
            }
        };

        // 2. 비밀번호 검증
        if let Err(e) = Self::verify_password(password.to_string(), user.password_hash.clone()).await {
            tracing::warn!(user_id = user.id, reason = "password_mismatch", "Login failed");
            return Err(e);
        }

        // 3. 활성 계정 확인
        if !user.is_active {
            tracing::warn!(user_id = user.id, reason = "inactive", "Login failed");
            return Err(AuthError::InvalidCredentials);
        }

        // 4. 새 토큰 쌍 발급 (기존 세션은 유지)
        let tokens = self.jwt_service.issue(user.id, &user.email).await?;
        tracing::info!(user_id = user.id, "User logged in");

        Ok((user, tokens))
    }

    /// 로그아웃 - Refresh Token 블랙리스트 등록
    /// Logout: blacklist the refresh token when one is given.
    ///
    /// An absent or empty token is a no-op.
    pub async fn logout(&self, refresh_token: Option<&str>) -> Result<(), AuthError> {
        match refresh_token.filter(|t| !t.is_empty()) {
            Some(token) => self.jwt_service.revoke(token).await,
            None => Ok(()),
        }
    }

    /// Refresh Token 으로 토큰 갱신 (사용자 활성 상태 확인)
    /// Refresh tokens; the owning user must still exist and be active
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.jwt_service.verify_refresh_token(refresh_token).await?;

        match self.users.get_user_by_id(claims.user_id).await? {
            Some(user) if user.is_active => {}
            _ => return Err(AuthError::InvalidToken),
        }

        self.jwt_service.refresh_verified(&claims, refresh_token).await
    }

    /// Bearer Access Token 인증
    /// Resolve a bearer access token to an existing, active user
    pub async fn authenticate(&self, access_token: &str) -> Result<User, AuthError> {
        let claims = self
            .jwt_service
            .verify_access_token(access_token)
            .map_err(|_| AuthError::NotAuthenticated)?;

        match self.users.get_user_by_id(claims.user_id).await? {
            Some(user) if user.is_active => Ok(user),
            _ => Err(AuthError::NotAuthenticated),
        }
    }

    pub async fn get_user_info(&self, user_id: u64) -> Result<User, AuthError> {
        self.users
            .get_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound { id: user_id })
    }

    /// 프로필 수정 (PUT: partial = false, PATCH: partial = true)
    /// Update the caller's own profile
    pub async fn update_profile(
        &self,
        user_id: u64,
        request: ProfileUpdateRequest,
        partial: bool,
    ) -> Result<User, AuthError> {
        let mut errors = ValidationErrors::new();
        let changes = Self::validate_profile(request.into_changes(partial), &mut errors);
        errors.into_result()?;

        if changes.is_empty() {
            return self.get_user_info(user_id).await;
        }

        let user = self.users.update_profile(user_id, changes).await?;
        tracing::info!(user_id, "Profile updated");
        Ok(user)
    }

    /// 계정 활성 / 비활성 전환
    pub async fn set_active(&self, user_id: u64, is_active: bool) -> Result<(), AuthError> {
        self.users.set_active(user_id, is_active).await?;
        Ok(())
    }

    // 공백 정리 + 빈 문자열은 null 로 취급한 뒤 필드 검증
    fn validate_profile(changes: ProfileChanges, errors: &mut ValidationErrors) -> ProfileChanges {
        fn clean(value: Option<Option<String>>) -> Option<Option<String>> {
            value.map(|v| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
        }

        let changes = ProfileChanges {
            username: clean(changes.username),
            first_name: clean(changes.first_name),
            last_name: clean(changes.last_name),
        };

        if let Some(Some(username)) = &changes.username {
            validation::validate_username(username, errors);
        }
        if let Some(Some(first_name)) = &changes.first_name {
            validation::validate_name("first_name", first_name, errors);
        }
        if let Some(Some(last_name)) = &changes.last_name {
            validation::validate_name("last_name", last_name, errors);
        }

        changes
    }

    async fn hash_password(password: String) -> Result<String, AuthError> {
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            let argon2 = Argon2::default();

            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| AuthError::PasswordHashingFailed(format!("Failed to hash password: {}", e)))
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_dummy_password(&self, password: &str) -> Result<(), AuthError> {
        let dummy_hash = self
            .dummy_hash
            .get_or_try_init(|| Self::hash_password(DUMMY_PASSWORD.to_string()))
            .await?;

        // 결과는 무시 (항상 실패로 처리)
        let _ = Self::verify_password(password.to_string(), dummy_hash.clone()).await;
        Ok(())
    }

    async fn verify_password(password: String, password_hash: String) -> Result<(), AuthError> {
        tokio::task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .map_err(|_| AuthError::InvalidCredentials)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::services::TokenSettings;
    use crate::shared::database::{InMemoryTokenStore, InMemoryUserStore};

    fn service() -> AuthService {
        let jwt = JwtService::new("unit-test-secret", TokenSettings::default(), Arc::new(InMemoryTokenStore::new()));
        AuthService::new(Arc::new(InMemoryUserStore::new()), jwt, PasswordPolicy::default())
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: Some(email.to_string()),
            password: Some("s3cure-passw0rd".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn password_is_stored_hashed() {
        let auth = service();
        let (user, _) = auth.register(register_request("a@example.com")).await.unwrap();

        assert_ne!(user.password_hash, "s3cure-passw0rd");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn registration_collects_all_field_errors() {
        let auth = service();
        let err = auth
            .register(RegisterRequest {
                email: Some("not-an-email".into()),
                password: Some("123".into()),
                password_confirm: Some("321".into()),
                username: Some("bad name!".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        let AuthError::Validation(errors) = err else { panic!("expected validation error") };
        for field in ["email", "password", "password_confirm", "username"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }

    #[tokio::test]
    async fn email_is_normalized_for_login() {
        let auth = service();
        auth.register(register_request("Jane@Example.COM")).await.unwrap();

        let (user, _) = auth
            .login(LoginRequest {
                email: Some("  Jane@example.com".into()),
                password: Some("s3cure-passw0rd".into()),
            })
            .await
            .unwrap();
        assert_eq!(user.email, "Jane@example.com");
    }

    #[tokio::test]
    async fn unknown_email_still_runs_password_hashing() {
        let auth = service();
        assert!(!auth.dummy_hash.initialized());

        let err = auth
            .login(LoginRequest {
                email: Some("nobody@example.com".into()),
                password: Some("s3cure-passw0rd".into()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        let dummy_hash = auth.dummy_hash.get().unwrap();
        assert!(dummy_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn authenticate_rejects_inactive_users() {
        let auth = service();
        let (user, tokens) = auth.register(register_request("c@example.com")).await.unwrap();
        assert_eq!(auth.authenticate(&tokens.access).await.unwrap().id, user.id);

        auth.set_active(user.id, false).await.unwrap();
        assert!(matches!(auth.authenticate(&tokens.access).await, Err(AuthError::NotAuthenticated)));
        assert!(matches!(auth.refresh_session(&tokens.refresh).await, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn logout_without_token_is_noop() {
        let auth = service();
        assert!(auth.logout(None).await.is_ok());
        assert!(auth.logout(Some("")).await.is_ok());
        assert!(matches!(auth.logout(Some("garbage")).await, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn blank_profile_values_clear_fields() {
        let auth = service();
        let (user, _) = auth
            .register(RegisterRequest {
                first_name: Some("Ann".into()),
                ..register_request("d@example.com")
            })
            .await
            .unwrap();

        let updated = auth
            .update_profile(
                user.id,
                ProfileUpdateRequest {
                    first_name: Some(Some("   ".into())),
                    ..Default::default()
                },
                true,
            )
            .await
            .unwrap();
        assert_eq!(updated.first_name, None);
    }
}
