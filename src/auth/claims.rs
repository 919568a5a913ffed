use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "admin";

/// JWT payload issued on login.
///
/// `username` and `role` decode as optional so a well-signed token that lacks
/// them can be rejected explicitly by the handlers that need them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub exp: usize, // expires at (unix timestamp)
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}
