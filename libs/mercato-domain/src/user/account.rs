//! Credentials served on their own, with the owning user nested

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};

use super::credential::{Credential, RoleBasedAuthority};
use crate::composition::{Composition, RemoteLinks};
use crate::error::Result;
use crate::ports::{Record, RemoteResolver};
use crate::remote::UserInfo;

/// Persisted credential together with a copy of its owner
///
/// `credential.user_id` always mirrors `user.user_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialRecord {
    pub credential: Credential,
    pub user: Option<UserInfo>,
}

impl CredentialRecord {
    pub fn username(&self) -> Option<&str> {
        self.credential.username.as_deref()
    }
}

impl Record for CredentialRecord {
    type Key = i32;

    fn key(&self) -> Option<i32> {
        self.credential.credential_id
    }

    fn with_key(mut self, key: i32) -> Self {
        self.credential.credential_id = Some(key);
        self
    }

    fn with_generated_key(self, seq: i32) -> Self {
        self.with_key(seq)
    }
}

/// Credential as exposed by the credential endpoints
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct CredentialDto {
    pub credential_id: Option<i32>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role_based_authority: Option<RoleBasedAuthority>,
    pub is_enabled: Option<bool>,
    pub is_account_non_expired: Option<bool>,
    pub is_account_non_locked: Option<bool>,
    pub is_credentials_non_expired: Option<bool>,
    pub user: Option<UserInfo>,
}

impl fmt::Debug for CredentialDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialDto")
            .field("credential_id", &self.credential_id)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("role_based_authority", &self.role_based_authority)
            .field("is_enabled", &self.is_enabled)
            .field("is_account_non_expired", &self.is_account_non_expired)
            .field("is_account_non_locked", &self.is_account_non_locked)
            .field("is_credentials_non_expired", &self.is_credentials_non_expired)
            .field("user", &self.user)
            .finish()
    }
}

/// Composition policy for credentials
pub struct CredentialComposition;

impl Composition for CredentialComposition {
    type Record = CredentialRecord;
    type Composed = CredentialDto;
    type Links = ();

    const ENTITY_TYPE: &'static str = "Credential";
    const DISTINCT_LIST: bool = true;

    fn split(dto: CredentialDto) -> (CredentialRecord, ()) {
        let credential = Credential {
            credential_id: dto.credential_id,
            username: dto.username,
            password: dto.password,
            role_based_authority: dto.role_based_authority,
            is_enabled: dto.is_enabled,
            is_account_non_expired: dto.is_account_non_expired,
            is_account_non_locked: dto.is_account_non_locked,
            is_credentials_non_expired: dto.is_credentials_non_expired,
            user_id: dto.user.as_ref().and_then(|user| user.user_id),
        };
        (
            CredentialRecord {
                credential,
                user: dto.user,
            },
            (),
        )
    }

    fn join(record: CredentialRecord, _: ()) -> CredentialDto {
        let credential = record.credential;
        CredentialDto {
            credential_id: credential.credential_id,
            username: credential.username,
            password: credential.password,
            role_based_authority: credential.role_based_authority,
            is_enabled: credential.is_enabled,
            is_account_non_expired: credential.is_account_non_expired,
            is_account_non_locked: credential.is_account_non_locked,
            is_credentials_non_expired: credential.is_credentials_non_expired,
            user: record.user,
        }
    }

    fn retain_consistent(_: &CredentialRecord, links: ()) {
        links
    }

    fn resolve_missing<R: RemoteResolver>(
        _remote: &RemoteLinks<R>,
        _record: &CredentialRecord,
        links: (),
    ) -> impl Future<Output = Result<()>> + Send {
        std::future::ready(Ok(links))
    }
}
