//! Keys addressed by URL path segments

use mercato_domain::datetime;
use mercato_domain::favourite::FavouriteId;
use mercato_domain::order_item::OrderItemId;
use serde::de::DeserializeOwned;

/// A key that can be captured from the request path
pub trait RouteKey: Send + Sync + Sized + 'static {
    /// Route suffix capturing every component, one segment each
    const PATH: &'static str;

    /// Raw captured segments
    type Segments: DeserializeOwned + Send + 'static;

    /// Build the key, or explain why the segments do not form one
    fn from_segments(segments: Self::Segments) -> Result<Self, String>;
}

impl RouteKey for i32 {
    const PATH: &'static str = "/:id";
    type Segments = i32;

    fn from_segments(id: i32) -> Result<Self, String> {
        Ok(id)
    }
}

impl RouteKey for OrderItemId {
    const PATH: &'static str = "/:product_id/:order_id";
    type Segments = (i32, i32);

    fn from_segments((product_id, order_id): (i32, i32)) -> Result<Self, String> {
        Ok(OrderItemId::new(product_id, order_id))
    }
}

impl RouteKey for FavouriteId {
    const PATH: &'static str = "/:user_id/:product_id/:like_date";
    type Segments = (i32, i32, String);

    fn from_segments((user_id, product_id, like_date): (i32, i32, String)) -> Result<Self, String> {
        let like_date = datetime::parse(&like_date)
            .map_err(|err| format!("Invalid likeDate {:?}: {}", like_date, err))?;
        Ok(FavouriteId::new(user_id, product_id, like_date))
    }
}
