use std::fmt;

use serde::{Deserialize, Serialize};

/// Authority granted to a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleBasedAuthority {
    RoleUser,
    RoleAdmin,
}

impl fmt::Display for RoleBasedAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoleUser => f.write_str("ROLE_USER"),
            Self::RoleAdmin => f.write_str("ROLE_ADMIN"),
        }
    }
}

/// Login credential owned by a user
///
/// `user_id` is a back-reference to the owner. The password is kept as
/// supplied and is never rendered by `Debug`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct Credential {
    pub credential_id: Option<i32>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role_based_authority: Option<RoleBasedAuthority>,
    pub is_enabled: Option<bool>,
    pub is_account_non_expired: Option<bool>,
    pub is_account_non_locked: Option<bool>,
    pub is_credentials_non_expired: Option<bool>,
    pub user_id: Option<i32>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("credential_id", &self.credential_id)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("role_based_authority", &self.role_based_authority)
            .field("is_enabled", &self.is_enabled)
            .field("is_account_non_expired", &self.is_account_non_expired)
            .field("is_account_non_locked", &self.is_account_non_locked)
            .field("is_credentials_non_expired", &self.is_credentials_non_expired)
            .field("user_id", &self.user_id)
            .finish()
    }
}
