use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Role;

/// An authenticated account, hospital or doctor.
///
/// `institution_name` is populated for hospitals, `specialization` and
/// `bio` for doctors; the backend omits the fields that do not apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}
