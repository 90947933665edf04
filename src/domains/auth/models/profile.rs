use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use crate::domains::auth::models::user::ProfileChanges;

/// 프로필 수정 요청 (PUT / PATCH 공용)
/// Profile update body shared by PUT and PATCH.
///
/// Each field distinguishes "absent" (`None`) from explicit `null`
/// (`Some(None)`). `email`, `id` and other keys are not part of the body and
/// are ignored when sent.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[schema(as = ProfileUpdateRequest)]
pub struct ProfileUpdateRequest {
    #[schema(value_type = Option<String>, example = "johndoe")]
    #[serde(default, deserialize_with = "present")]
    pub username: Option<Option<String>>,

    #[schema(value_type = Option<String>, example = "John")]
    #[serde(default, deserialize_with = "present")]
    pub first_name: Option<Option<String>>,

    #[schema(value_type = Option<String>, example = "Doe")]
    #[serde(default, deserialize_with = "present")]
    pub last_name: Option<Option<String>>,
}

impl ProfileUpdateRequest {
    /// PATCH: 전달된 필드만 변경 / PUT: 누락된 필드는 null 로 초기화
    /// Partial keeps absent fields; full update clears them
    pub fn into_changes(self, partial: bool) -> ProfileChanges {
        if partial {
            ProfileChanges {
                username: self.username,
                first_name: self.first_name,
                last_name: self.last_name,
            }
        } else {
            ProfileChanges {
                username: Some(self.username.flatten()),
                first_name: Some(self.first_name.flatten()),
                last_name: Some(self.last_name.flatten()),
            }
        }
    }
}

// 필드가 존재하면 (null 포함) Some 으로 감싼다
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
