//! Products - no remote references
//!
//! The category is a value owned by the product and persisted with it.
//! Deletes confirm existence first.

use serde::{Deserialize, Serialize};

use crate::composition::{Composition, DeletePolicy, RemoteLinks};
use crate::error::{CompositionError, Result};
use crate::ports::{Record, RemoteResolver};

/// Category embedded in a product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    pub category_id: Option<i32>,
    pub category_title: Option<String>,
    pub image_url: Option<String>,
}

/// Persisted product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: Option<i32>,
    pub product_title: Option<String>,
    pub image_url: Option<String>,
    pub sku: Option<String>,
    pub price_unit: Option<f64>,
    pub quantity: Option<i32>,
    pub category: Option<Category>,
}

impl Record for Product {
    type Key = i32;

    fn key(&self) -> Option<i32> {
        self.product_id
    }

    fn with_key(mut self, key: i32) -> Self {
        self.product_id = Some(key);
        self
    }

    fn with_generated_key(self, seq: i32) -> Self {
        self.with_key(seq)
    }
}

/// Product as exposed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default)]
    pub product_id: Option<i32>,
    #[serde(default)]
    pub product_title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price_unit: Option<f64>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub category: Option<Category>,
}

/// Composition policy for products
pub struct ProductComposition;

impl Composition for ProductComposition {
    type Record = Product;
    type Composed = ProductDto;
    type Links = ();

    const ENTITY_TYPE: &'static str = "Product";
    const DELETE_POLICY: DeletePolicy = DeletePolicy::CheckExisting;

    fn split(dto: ProductDto) -> (Product, ()) {
        let product = Product {
            product_id: dto.product_id,
            product_title: dto.product_title,
            image_url: dto.image_url,
            sku: dto.sku,
            price_unit: dto.price_unit,
            quantity: dto.quantity,
            category: dto.category,
        };
        (product, ())
    }

    fn join(product: Product, _: ()) -> ProductDto {
        ProductDto {
            product_id: product.product_id,
            product_title: product.product_title,
            image_url: product.image_url,
            sku: product.sku,
            price_unit: product.price_unit,
            quantity: product.quantity,
            category: product.category,
        }
    }

    fn retain_consistent(_: &Product, links: ()) {
        links
    }

    fn resolve_missing<R: RemoteResolver>(
        _remote: &RemoteLinks<R>,
        _product: &Product,
        links: (),
    ) -> impl std::future::Future<Output = Result<()>> + Send {
        std::future::ready(Ok(links))
    }

    fn validate(product: &Product) -> Result<()> {
        if product.price_unit.is_some_and(|price| price < 0.0) {
            return Err(CompositionError::validation("priceUnit must not be negative"));
        }
        if product.quantity.is_some_and(|quantity| quantity < 0) {
            return Err(CompositionError::validation("quantity must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Composer;
    use crate::remote::RemoteEndpoints;
    use crate::testing::{MemoryStore, StubResolver};

    fn electronics() -> Category {
        Category {
            category_id: Some(1),
            category_title: Some("Electronics".to_string()),
            image_url: None,
        }
    }

    fn keyboard(quantity: i32) -> ProductDto {
        ProductDto {
            product_id: None,
            product_title: Some("New Keyboard".to_string()),
            image_url: None,
            sku: Some("KEYB-001".to_string()),
            price_unit: Some(75.5),
            quantity: Some(quantity),
            category: Some(electronics()),
        }
    }

    fn service() -> Composer<ProductComposition, MemoryStore<Product>, StubResolver> {
        Composer::with_collaborators(
            MemoryStore::default(),
            StubResolver::default(),
            RemoteEndpoints::default(),
        )
    }

    #[tokio::test]
    async fn test_save_product_with_zero_stock() {
        let service = service();

        let saved = service.save(keyboard(0)).await.unwrap();

        assert_eq!(saved.product_id, Some(1));
        assert_eq!(saved.quantity, Some(0));
        assert_eq!(
            saved.category.and_then(|c| c.category_title).as_deref(),
            Some("Electronics")
        );
    }

    #[tokio::test]
    async fn test_save_rejects_negative_quantity() {
        let service = service();

        let err = service.save(keyboard(-1)).await.unwrap_err();

        assert!(matches!(err, CompositionError::ValidationFailure(_)));
        assert_eq!(service.store().writes(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_product_fails() {
        let service = service();

        let err = service.remove(&999).await.unwrap_err();

        assert_eq!(err.to_string(), "Product with id: 999 not found");
    }
}
