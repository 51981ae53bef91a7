use std::future::Future;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::credential::Credential;
use crate::composition::{Composition, RemoteLinks};
use crate::datetime;
use crate::error::Result;
use crate::ports::{Record, RemoteResolver};

/// Persisted verification token with the credential it unlocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationToken {
    pub verification_token_id: Option<i32>,
    pub token: Option<String>,
    pub expire_date: Option<NaiveDate>,
    pub credential: Option<Credential>,
}

impl Record for VerificationToken {
    type Key = i32;

    fn key(&self) -> Option<i32> {
        self.verification_token_id
    }

    fn with_key(mut self, key: i32) -> Self {
        self.verification_token_id = Some(key);
        self
    }

    fn with_generated_key(self, seq: i32) -> Self {
        self.with_key(seq)
    }
}

/// Verification token as exposed to callers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct VerificationTokenDto {
    pub verification_token_id: Option<i32>,
    pub token: Option<String>,
    #[serde(with = "datetime::date")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "16-01-2024"))]
    pub expire_date: Option<NaiveDate>,
    pub credential: Option<Credential>,
}

/// Composition policy for verification tokens
pub struct VerificationTokenComposition;

impl Composition for VerificationTokenComposition {
    type Record = VerificationToken;
    type Composed = VerificationTokenDto;
    type Links = ();

    const ENTITY_TYPE: &'static str = "VerificationToken";
    const DISTINCT_LIST: bool = true;

    fn split(dto: VerificationTokenDto) -> (VerificationToken, ()) {
        let token = VerificationToken {
            verification_token_id: dto.verification_token_id,
            token: dto.token,
            expire_date: dto.expire_date,
            credential: dto.credential,
        };
        (token, ())
    }

    fn join(token: VerificationToken, _: ()) -> VerificationTokenDto {
        VerificationTokenDto {
            verification_token_id: token.verification_token_id,
            token: token.token,
            expire_date: token.expire_date,
            credential: token.credential,
        }
    }

    fn retain_consistent(_: &VerificationToken, links: ()) {
        links
    }

    fn resolve_missing<R: RemoteResolver>(
        _remote: &RemoteLinks<R>,
        _token: &VerificationToken,
        links: (),
    ) -> impl Future<Output = Result<()>> + Send {
        std::future::ready(Ok(links))
    }
}
