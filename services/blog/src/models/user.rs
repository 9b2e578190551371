//! User directory models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Username/password pair held by the user directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredential {
    pub username: String,
    pub password: String,
}

/// Request for user login
///
/// Missing fields deserialise as empty strings, which never match a
/// directory entry.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[schema(example = json!({ "username": "tienkim9920", "password": "123" }))]
pub struct LoginRequest {
    /// The login username
    #[serde(default)]
    pub username: String,
    /// The login password
    #[serde(default)]
    pub password: String,
}
