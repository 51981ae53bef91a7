use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ids::FavouriteId;
use crate::composition::{Composition, RemoteLinks};
use crate::datetime;
use crate::error::Result;
use crate::ports::{Record, RemoteResolver};
use crate::remote::{consistent, ProductInfo, UserInfo};

/// Persisted favourite; all three fields form the key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favourite {
    pub user_id: i32,
    pub product_id: i32,
    pub like_date: NaiveDateTime,
}

impl Record for Favourite {
    type Key = FavouriteId;

    fn key(&self) -> Option<FavouriteId> {
        Some(FavouriteId::new(self.user_id, self.product_id, self.like_date))
    }

    fn with_key(self, key: FavouriteId) -> Self {
        Self {
            user_id: key.user_id.unwrap_or(self.user_id),
            product_id: key.product_id.unwrap_or(self.product_id),
            like_date: key.like_date.unwrap_or(self.like_date),
        }
    }
}

/// Favourite with the user and the product nested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FavouriteDto {
    pub user_id: i32,
    pub product_id: i32,
    #[serde(with = "datetime")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "15-01-2024__10:30:00:000000"))]
    pub like_date: NaiveDateTime,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub product: Option<ProductInfo>,
}

/// Enrichment policy for favourites
pub struct FavouriteComposition;

impl Composition for FavouriteComposition {
    type Record = Favourite;
    type Composed = FavouriteDto;
    type Links = (Option<UserInfo>, Option<ProductInfo>);

    const ENTITY_TYPE: &'static str = "Favourite";

    fn split(dto: FavouriteDto) -> (Favourite, Self::Links) {
        let favourite = Favourite {
            user_id: dto.user_id,
            product_id: dto.product_id,
            like_date: dto.like_date,
        };
        (favourite, (dto.user, dto.product))
    }

    fn join(favourite: Favourite, (user, product): Self::Links) -> FavouriteDto {
        FavouriteDto {
            user_id: favourite.user_id,
            product_id: favourite.product_id,
            like_date: favourite.like_date,
            user,
            product,
        }
    }

    fn retain_consistent(favourite: &Favourite, (user, product): Self::Links) -> Self::Links {
        (
            consistent(user, favourite.user_id),
            consistent(product, favourite.product_id),
        )
    }

    fn resolve_missing<R: RemoteResolver>(
        remote: &RemoteLinks<R>,
        favourite: &Favourite,
        (user, product): Self::Links,
    ) -> impl std::future::Future<Output = Result<Self::Links>> + Send {
        let (user_id, product_id) = (favourite.user_id, favourite.product_id);
        async move {
            tokio::try_join!(
                remote.fill(user_id, user),
                remote.fill(product_id, product)
            )
        }
    }
}
