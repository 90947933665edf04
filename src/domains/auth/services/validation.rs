// 입력값 검증 (회원가입 / 로그인 / 프로필)
// Field validators; each one appends to a shared ValidationErrors map
use crate::shared::errors::ValidationErrors;

pub const REQUIRED: &str = "This field is required.";
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_NAME_LENGTH: usize = 150;

/// 비밀번호 정책
/// Password policy
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

/// 이메일 정규화: 앞뒤 공백 제거 + 도메인 소문자화
/// Trim and lower-case the domain part; the local part is kept as typed
pub fn normalize_email(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => trimmed.to_string(),
    }
}

/// 필수 문자열 필드: 없거나 공백뿐이면 에러
pub fn require<'a>(field: &str, value: Option<&'a str>, errors: &mut ValidationErrors) -> Option<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        Some(_) => {
            errors.add(field, "This field may not be blank.");
            None
        }
        None => {
            errors.add(field, REQUIRED);
            None
        }
    }
}

pub fn validate_email(email: &str, errors: &mut ValidationErrors) {
    if email.chars().count() > MAX_EMAIL_LENGTH {
        errors.add("email", format!("Ensure this field has no more than {} characters.", MAX_EMAIL_LENGTH));
        return;
    }
    if !is_valid_email(email) {
        errors.add("email", "Enter a valid email address.");
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain
        .split('.')
        .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
}

pub fn validate_password(
    password: &str,
    email: Option<&str>,
    policy: PasswordPolicy,
    errors: &mut ValidationErrors,
) {
    if password.chars().count() < policy.min_length {
        errors.add(
            "password",
            format!(
                "This password is too short. It must contain at least {} characters.",
                policy.min_length
            ),
        );
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        errors.add("password", "This password is entirely numeric.");
    }
    if let Some(email) = email {
        let lowered = password.to_lowercase();
        let email = email.to_lowercase();
        let local = email.split('@').next().unwrap_or_default();
        if lowered == email || (!local.is_empty() && lowered == local) {
            errors.add("password", "The password is too similar to the email.");
        }
    }
}

pub fn validate_username(username: &str, errors: &mut ValidationErrors) {
    if username.chars().count() > MAX_NAME_LENGTH {
        errors.add("username", format!("Ensure this field has no more than {} characters.", MAX_NAME_LENGTH));
    }
    if username.is_empty()
        || !username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        errors.add(
            "username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        );
    }
}

pub fn validate_name(field: &str, value: &str, errors: &mut ValidationErrors) {
    if value.chars().count() > MAX_NAME_LENGTH {
        errors.add(field, format!("Ensure this field has no more than {} characters.", MAX_NAME_LENGTH));
    }
}
