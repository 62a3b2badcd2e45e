use crate::{
    entities::commerce::ProductModel,
    errors::ServiceError,
    repositories::product_repository::{self, NewProduct, ProductChanges},
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::sync::Arc;
use tracing::{info, instrument};

pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Service for managing catalog products
#[derive(Clone)]
pub struct ProductService {
    db: Arc<DatabaseConnection>,
}

impl ProductService {
    /// Creates a new product service instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists every product in id order
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductModel>, ServiceError> {
        let txn = self.db.begin().await?;
        let products = product_repository::get_products(&txn).await?;
        txn.commit().await?;
        Ok(products)
    }

    /// Fetches one product
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: i32) -> Result<ProductModel, ServiceError> {
        let txn = self.db.begin().await?;
        let product = product_repository::get_product(&txn, product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;
        txn.commit().await?;
        Ok(product)
    }

    /// Create a new product
    #[instrument(skip(self))]
    pub async fn create_product(&self, new_product: NewProduct) -> Result<ProductModel, ServiceError> {
        let txn = self.db.begin().await?;
        let product = product_repository::create_product(&txn, new_product).await?;
        txn.commit().await?;

        info!(product_id = product.id, "Created product");
        Ok(product)
    }

    /// Applies a partial update to a product
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        product_id: i32,
        changes: ProductChanges,
    ) -> Result<ProductModel, ServiceError> {
        let txn = self.db.begin().await?;
        let product = product_repository::update_product(&txn, product_id, changes)
            .await?
            .ok_or_else(|| ServiceError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;
        txn.commit().await?;

        info!(product_id, "Updated product");
        Ok(product)
    }

    /// Deletes a product, returning the removed row
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: i32) -> Result<ProductModel, ServiceError> {
        let txn = self.db.begin().await?;
        let product = product_repository::delete_product(&txn, product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;
        txn.commit().await?;

        info!(product_id, "Deleted product");
        Ok(product)
    }
}
