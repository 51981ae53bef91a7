use std::future::Future;

use serde::{Deserialize, Serialize};

use super::credential::Credential;
use crate::composition::{Composition, RemoteLinks};
use crate::error::{CompositionError, Result};
use crate::ports::{Record, RemoteResolver};

/// Persisted user together with its owned credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub credential: Option<Credential>,
}

impl User {
    /// Username of the owned credential, if any
    pub fn username(&self) -> Option<&str> {
        self.credential.as_ref()?.username.as_deref()
    }
}

impl Record for User {
    type Key = i32;

    fn key(&self) -> Option<i32> {
        self.user_id
    }

    /// Re-address the user; a back-reference to the previous id follows along
    fn with_key(mut self, key: i32) -> Self {
        let previous = self.user_id.replace(key);
        if let Some(credential) = self.credential.as_mut() {
            if credential.user_id.is_none() || credential.user_id == previous {
                credential.user_id = Some(key);
            }
        }
        self
    }

    fn with_generated_key(mut self, seq: i32) -> Self {
        self.user_id = Some(seq);
        if let Some(credential) = self.credential.as_mut() {
            credential.user_id = Some(seq);
            credential.credential_id.get_or_insert(seq);
        }
        self
    }
}

/// User as exposed to callers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct UserDto {
    pub user_id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub credential: Option<Credential>,
}

/// Composition policy for users: no remote references
pub struct UserComposition;

impl Composition for UserComposition {
    type Record = User;
    type Composed = UserDto;
    type Links = ();

    const ENTITY_TYPE: &'static str = "User";
    const DISTINCT_LIST: bool = true;

    fn split(dto: UserDto) -> (User, ()) {
        let mut credential = dto.credential;
        if let (Some(user_id), Some(credential)) = (dto.user_id, credential.as_mut()) {
            credential.user_id.get_or_insert(user_id);
        }
        let user = User {
            user_id: dto.user_id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            image_url: dto.image_url,
            email: dto.email,
            phone: dto.phone,
            credential,
        };
        (user, ())
    }

    fn join(user: User, _: ()) -> UserDto {
        UserDto {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            image_url: user.image_url,
            email: user.email,
            phone: user.phone,
            credential: user.credential,
        }
    }

    fn retain_consistent(_: &User, links: ()) {
        links
    }

    fn resolve_missing<R: RemoteResolver>(
        _remote: &RemoteLinks<R>,
        _user: &User,
        links: (),
    ) -> impl Future<Output = Result<()>> + Send {
        std::future::ready(Ok(links))
    }

    /// A keyed user must own its credential; a new user gets the
    /// back-reference stamped when its id is assigned.
    fn validate(user: &User) -> Result<()> {
        let owner = user.credential.as_ref().and_then(|c| c.user_id);
        match (user.user_id, owner) {
            (Some(id), Some(owner)) if id != owner => Err(CompositionError::validation(format!(
                "credential belongs to user {} but is attached to user {}",
                owner, id
            ))),
            _ => Ok(()),
        }
    }
}
