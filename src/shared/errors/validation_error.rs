use std::collections::BTreeMap;
use serde::Serialize;
use thiserror::Error;

/// 특정 필드에 속하지 않는 에러의 키 (본문 파싱 실패 등)
/// Key for errors not tied to one field, such as an unparsable body
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// 필드별 검증 에러 목록
/// Field-level validation errors, serialized as `{"field": ["message", ...]}`
#[derive(Error, Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[error("Validation failed on {} field(s)", .fields.len())]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 단일 필드 에러로 생성
    /// Create with a single field error
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 에러가 없으면 Ok, 있으면 Err(self)
    /// Ok when no field failed, otherwise Err(self)
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}
