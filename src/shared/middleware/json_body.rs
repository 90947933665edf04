use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use crate::shared::errors::{ApiError, AuthError, ValidationErrors, NON_FIELD_ERRORS};

/// JSON 요청 본문 Extractor
/// JSON body extractor whose failures are field-error maps (400).
///
/// - 빈 본문은 `{}` 로 취급 (필수 필드 에러는 Service 에서 보고)
/// - 파싱 불가 / 객체가 아님 → `non_field_errors`
/// - 타입이 맞지 않는 필드 → 해당 필드 키
///
/// Content-Type 은 확인하지 않음.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| -> ApiError {
            AuthError::Validation(ValidationErrors::single(NON_FIELD_ERRORS, e.body_text())).into()
        })?;

        parse_body(&bytes)
            .map(ValidatedJson)
            .map_err(|errors| AuthError::Validation(errors).into())
    }
}

/// 본문 파싱 (Extractor 외부에서도 사용 가능)
pub fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ValidationErrors> {
    let fields = if bytes.iter().all(u8::is_ascii_whitespace) {
        Map::new()
    } else {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                return Err(ValidationErrors::single(
                    NON_FIELD_ERRORS,
                    format!("Invalid data. Expected a dictionary, but got {}.", json_type(&other)),
                ));
            }
            Err(e) => {
                return Err(ValidationErrors::single(
                    NON_FIELD_ERRORS,
                    format!("JSON parse error - {}", e),
                ));
            }
        }
    };

    match serde_json::from_value::<T>(Value::Object(fields.clone())) {
        Ok(value) => Ok(value),
        Err(e) => Err(field_errors::<T>(fields, e)),
    }
}

// 실패한 필드를 하나씩 다시 역직렬화하여 찾는다 (요청 필드는 모두 optional)
fn field_errors<T: DeserializeOwned>(fields: Map<String, Value>, cause: serde_json::Error) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for (key, value) in fields {
        let mut single = Map::new();
        single.insert(key.clone(), value);
        if let Err(e) = serde_json::from_value::<T>(Value::Object(single)) {
            errors.add(&key, e.to_string());
        }
    }

    if errors.is_empty() {
        errors.add(NON_FIELD_ERRORS, cause.to_string());
    }
    errors
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
