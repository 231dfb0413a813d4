//! Contact Message Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Contact form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(alias = "_id")]
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub user_number: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

/// Create contact payload (`POST /contact`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactCreate {
    #[validate(length(min = 1))]
    pub user_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub user_number: String,
    #[validate(length(min = 1))]
    pub message: String,
}
