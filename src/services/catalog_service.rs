use std::sync::Arc;
use tracing::instrument;

use crate::models::{
    validate_product_id, Product, ProductCategory, ProductListResponse, ServiceError,
    ServiceResult,
};
use crate::repositories::ProductCatalog;

/// Service for browsing the product catalog
pub struct CatalogService {
    catalog: Arc<dyn ProductCatalog>,
}

impl CatalogService {
    /// Create a new CatalogService
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { catalog }
    }

    /// List products, optionally restricted to one category
    #[instrument(skip(self), fields(category = ?category))]
    pub async fn list_products(
        &self,
        category: Option<ProductCategory>,
    ) -> ServiceResult<ProductListResponse> {
        crate::info_with_trace!("Listing products");

        let products = match category {
            Some(category) => self.catalog.get_by_category(&category).await?,
            None => self.catalog.get_all().await?,
        };

        let total_count = products.len();

        crate::info_with_trace!("Found {} products", total_count);

        Ok(ProductListResponse {
            products,
            total_count,
        })
    }

    /// Get a specific product by ID
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &str) -> ServiceResult<Product> {
        crate::info_with_trace!("Retrieving product details");

        validate_product_id(id)?;

        match self.catalog.get_by_id(id).await? {
            Some(product) => {
                crate::info_with_trace!("Product found");
                Ok(product)
            }
            None => Err(ServiceError::ProductNotFound { id: id.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::StaticCatalog;

    #[tokio::test]
    async fn test_list_all_products() {
        let service = CatalogService::new(Arc::new(StaticCatalog::new()));

        let response = service.list_products(None).await.unwrap();

        assert_eq!(response.total_count, 17);
        assert_eq!(response.products.len(), 17);
    }

    #[tokio::test]
    async fn test_list_products_by_category() {
        let service = CatalogService::new(Arc::new(StaticCatalog::new()));

        let response = service
            .list_products(Some(ProductCategory::CompetitionEquipment))
            .await
            .unwrap();

        assert_eq!(response.total_count, 1);
        assert_eq!(response.products[0].id, "1");
    }

    #[tokio::test]
    async fn test_get_product_found() {
        let service = CatalogService::new(Arc::new(StaticCatalog::new()));

        let product = service.get_product("3").await.unwrap();

        assert_eq!(product.name, "Ultra Grip Flat Handle");
        assert_eq!(product.brand, "BOERFORCE");
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let service = CatalogService::new(Arc::new(StaticCatalog::new()));

        let result = service.get_product("999").await;

        match result.unwrap_err() {
            ServiceError::ProductNotFound { id } => assert_eq!(id, "999"),
            other => panic!("Expected ProductNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_product_empty_id_rejected() {
        let service = CatalogService::new(Arc::new(StaticCatalog::new()));

        assert!(matches!(
            service.get_product("").await,
            Err(ServiceError::ValidationError { .. })
        ));
    }
}
