use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::entities::commerce::ProductModel;
use crate::errors::ServiceError;
use crate::repositories::{NewProduct, ProductChanges};

/// Body of product create and update requests.
///
/// On update, fields left out of the body keep their stored value, and an
/// explicit `"description": null` clears the description.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Desk Lamp",
    "price": 24.99,
    "description": "LED, adjustable arm",
    "stock": 12
}))]
pub struct ProductPayload {
    #[serde(default)]
    pub name: Option<String>,

    #[validate(range(min = 0.0))]
    pub price: f64,

    #[serde(default, deserialize_with = "super::deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    #[validate(range(min = 0))]
    pub stock: i32,
}

impl ProductPayload {
    /// Fields for a new product. The storage layer requires a name.
    pub fn into_new_product(self) -> Result<NewProduct, ServiceError> {
        let name = self
            .name
            .ok_or_else(|| ServiceError::ValidationError("name: field required".to_string()))?;

        Ok(NewProduct {
            name,
            price: self.price,
            description: self.description.flatten(),
            stock: self.stock,
        })
    }

    pub fn into_changes(self) -> ProductChanges {
        ProductChanges {
            name: self.name,
            price: Some(self.price),
            description: self.description,
            stock: Some(self.stock),
        }
    }
}

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub stock: i32,
}

impl From<ProductModel> for ProductDto {
    fn from(model: ProductModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            description: model.description,
            stock: model.stock,
        }
    }
}

/// Confirmation message body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DetailResponse {
    #[schema(example = "Product deleted")]
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
