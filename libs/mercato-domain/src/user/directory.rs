use std::future::Future;

use super::account::{CredentialComposition, CredentialRecord};
use super::entity::{User, UserComposition};
use crate::composition::{Composer, CompositionPort};
use crate::error::Result;
use crate::ports::{LocalStore, RemoteResolver};

/// Lookup by the username carried by a credential
///
/// Misses fail with `EntityNotFound` naming the username rather than a key.
pub trait UsernameDirectory: CompositionPort {
    fn find_by_username(&self, username: &str) -> impl Future<Output = Result<Self::Composed>> + Send;
}

impl<S, R> UsernameDirectory for Composer<UserComposition, S, R>
where
    S: LocalStore<User>,
    R: RemoteResolver,
{
    fn find_by_username(&self, username: &str) -> impl Future<Output = Result<Self::Composed>> + Send {
        self.find_by("username", username, move |user: &User| {
            user.username() == Some(username)
        })
    }
}

impl<S, R> UsernameDirectory for Composer<CredentialComposition, S, R>
where
    S: LocalStore<CredentialRecord>,
    R: RemoteResolver,
{
    fn find_by_username(&self, username: &str) -> impl Future<Output = Result<Self::Composed>> + Send {
        self.find_by("username", username, move |record: &CredentialRecord| {
            record.username() == Some(username)
        })
    }
}
