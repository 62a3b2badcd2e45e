use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::product::ProductDto;
use crate::repositories::{CartLine, CartWithItems};

fn default_quantity() -> i32 {
    1
}

/// Body of the add, remove and update cart requests
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"product_id": 1, "quantity": 2}))]
pub struct CartItemPayload {
    pub product_id: i32,

    /// Defaults to 1; ignored by remove
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1))]
    #[schema(default = 1, minimum = 1)]
    pub quantity: i32,
}

/// One cart line with its product embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItemDto {
    pub id: i32,
    pub product: ProductDto,
    pub quantity: i32,
}

impl From<CartLine> for CartItemDto {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.item.id,
            product: line.product.into(),
            quantity: line.item.quantity,
        }
    }
}

/// Cart as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartDto {
    pub id: i32,
    pub items: Vec<CartItemDto>,
}

impl From<CartWithItems> for CartDto {
    fn from(cart: CartWithItems) -> Self {
        Self {
            id: cart.cart.id,
            items: cart.items.into_iter().map(CartItemDto::from).collect(),
        }
    }
}
