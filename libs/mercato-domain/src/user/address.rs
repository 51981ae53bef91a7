use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::composition::{Composition, RemoteLinks};
use crate::error::Result;
use crate::ports::{Record, RemoteResolver};
use crate::remote::UserInfo;

/// Persisted address; the resident is stored with it
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub address_id: Option<i32>,
    pub full_address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub user: Option<UserInfo>,
}

impl Record for Address {
    type Key = i32;

    fn key(&self) -> Option<i32> {
        self.address_id
    }

    fn with_key(mut self, key: i32) -> Self {
        self.address_id = Some(key);
        self
    }

    fn with_generated_key(self, seq: i32) -> Self {
        self.with_key(seq)
    }
}

/// Address as exposed to callers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct AddressDto {
    pub address_id: Option<i32>,
    pub full_address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub user: Option<UserInfo>,
}

/// Composition policy for addresses: the user lives in the same service
pub struct AddressComposition;

impl Composition for AddressComposition {
    type Record = Address;
    type Composed = AddressDto;
    type Links = ();

    const ENTITY_TYPE: &'static str = "Address";
    const DISTINCT_LIST: bool = true;

    fn split(dto: AddressDto) -> (Address, ()) {
        let address = Address {
            address_id: dto.address_id,
            full_address: dto.full_address,
            postal_code: dto.postal_code,
            city: dto.city,
            user: dto.user,
        };
        (address, ())
    }

    fn join(address: Address, _: ()) -> AddressDto {
        AddressDto {
            address_id: address.address_id,
            full_address: address.full_address,
            postal_code: address.postal_code,
            city: address.city,
            user: address.user,
        }
    }

    fn retain_consistent(_: &Address, links: ()) {
        links
    }

    fn resolve_missing<R: RemoteResolver>(
        _remote: &RemoteLinks<R>,
        _address: &Address,
        links: (),
    ) -> impl Future<Output = Result<()>> + Send {
        std::future::ready(Ok(links))
    }
}
