//! User domain module
//!
//! A user owns exactly one credential. The credential points back at its
//! owner through a plain id used for lookups only; the pair is kept
//! consistent when written rather than through shared ownership.
//!
//! The same service also keeps addresses, credentials on their own and
//! verification tokens. Their nested objects live in this service, so none
//! of them reaches a remote.

mod account;
mod address;
mod credential;
mod directory;
mod entity;
mod verification_token;

pub use account::{CredentialComposition, CredentialDto, CredentialRecord};
pub use address::{Address, AddressComposition, AddressDto};
pub use credential::{Credential, RoleBasedAuthority};
pub use directory::UsernameDirectory;
pub use entity::{User, UserComposition, UserDto};
pub use verification_token::{VerificationToken, VerificationTokenComposition, VerificationTokenDto};
