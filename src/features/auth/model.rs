use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Identity resolved from a verified access token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Profile id; the provider's `sub` claim parsed as a UUID
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Provider role claim (e.g. "authenticated")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            email: None,
            role: None,
        }
    }
}

/// Claims carried by the provider's access tokens
#[derive(Debug, Clone, Deserialize)]
pub(super) struct AccessClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(rename = "exp")]
    pub _exp: u64,
    #[serde(rename = "iss", default)]
    pub _iss: Option<String>,
}
