use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::datetime;
use crate::ports::EntityKey;

/// Composite key of a favourite
///
/// The like instant disambiguates repeated likes of the same product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteId {
    pub user_id: Option<i32>,
    pub product_id: Option<i32>,
    #[serde(default, with = "datetime::option")]
    pub like_date: Option<NaiveDateTime>,
}

impl FavouriteId {
    /// Create a complete key
    pub fn new(user_id: i32, product_id: i32, like_date: NaiveDateTime) -> Self {
        Self {
            user_id: Some(user_id),
            product_id: Some(product_id),
            like_date: Some(like_date),
        }
    }
}

impl EntityKey for FavouriteId {
    fn is_complete(&self) -> bool {
        self.user_id.is_some() && self.product_id.is_some() && self.like_date.is_some()
    }
}

impl fmt::Display for FavouriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let like_date = self
            .like_date
            .as_ref()
            .map_or_else(|| "null".to_string(), datetime::format);
        write!(f, "FavouriteId(userId=")?;
        match self.user_id {
            Some(id) => write!(f, "{}", id)?,
            None => f.write_str("null")?,
        }
        write!(f, ", productId=")?;
        match self.product_id {
            Some(id) => write!(f, "{}", id)?,
            None => f.write_str("null")?,
        }
        write!(f, ", likeDate={})", like_date)
    }
}
