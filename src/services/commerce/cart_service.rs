use crate::{
    errors::ServiceError,
    repositories::cart_repository::{self, CartRejection, CartWithItems},
};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const CART_NOT_FOUND: &str = "Cart not found";
pub const CANNOT_ADD_ITEM: &str = "Cannot add item (out of stock or not found)";
pub const ITEM_NOT_IN_CART: &str = "Item not in cart";
pub const CANNOT_UPDATE_QUANTITY: &str = "Cannot update quantity (out of stock or not found)";

/// Shopping cart service for the single-cart workflow.
///
/// The `CartService` provides:
/// - Cart creation
/// - Cart retrieval with every line's product loaded
/// - Adding, re-quantifying, and removing cart lines
///
/// Every method runs inside one database transaction. An early return drops
/// the transaction, which rolls it back before the connection goes back to
/// the pool.
///
/// Stock is checked when lines are added or re-quantified but never
/// decremented.
///
/// # Examples
///
/// ```ignore
/// use shopcart_api::services::commerce::CartService;
///
/// let cart_service = CartService::new(db);
///
/// let cart = cart_service.create_cart().await?;
/// let cart = cart_service.add_item(cart.cart.id, product_id, 2).await?;
/// ```
#[derive(Clone)]
pub struct CartService {
    db: Arc<DatabaseConnection>,
}

impl CartService {
    /// Creates a new `CartService` instance.
    ///
    /// # Arguments
    ///
    /// * `db` - Database connection pool
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a new, empty shopping cart.
    ///
    /// # Returns
    ///
    /// * `Ok(CartWithItems)` - The created cart with no lines
    /// * `Err(ServiceError)` - Database error if cart creation fails
    #[instrument(skip(self))]
    pub async fn create_cart(&self) -> Result<CartWithItems, ServiceError> {
        let txn = self.db.begin().await?;
        let cart = cart_repository::create_cart(&txn).await?;
        txn.commit().await?;

        info!(cart_id = cart.id, "Created cart");

        Ok(CartWithItems {
            cart,
            items: Vec::new(),
        })
    }

    /// Retrieves a cart with all its lines.
    ///
    /// # Errors
    ///
    /// * `ServiceError::NotFound` - If the cart doesn't exist
    #[instrument(skip(self))]
    pub async fn get_cart(&self, cart_id: i32) -> Result<CartWithItems, ServiceError> {
        let txn = self.db.begin().await?;
        let cart = Self::load_cart(&txn, cart_id).await?;
        txn.commit().await?;
        Ok(cart)
    }

    /// Adds a product to the cart.
    ///
    /// If the product already has a line in the cart, the quantities are
    /// merged. Both the requested quantity and the merged total must be
    /// covered by the product's stock.
    ///
    /// # Arguments
    ///
    /// * `cart_id` - The cart to add to
    /// * `product_id` - The product being added
    /// * `quantity` - Units to add
    ///
    /// # Returns
    ///
    /// * `Ok(CartWithItems)` - The updated cart
    /// * `Err(ServiceError::BadRequest)` - Cart or product missing, or not enough stock
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        cart_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<CartWithItems, ServiceError> {
        let txn = self.db.begin().await?;

        let line = cart_repository::add_item_to_cart(&txn, cart_id, product_id, quantity)
            .await?
            .map_err(|reason| Self::reject(reason, CANNOT_ADD_ITEM))?;

        let cart = Self::load_cart(&txn, cart_id).await?;
        txn.commit().await?;

        info!(
            cart_id,
            product_id,
            line_quantity = line.quantity,
            "Added item to cart"
        );

        Ok(cart)
    }

    /// Removes a product's line from the cart.
    ///
    /// # Errors
    ///
    /// * `ServiceError::NotFound` - If the cart holds no line for the product
    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        cart_id: i32,
        product_id: i32,
    ) -> Result<CartWithItems, ServiceError> {
        let txn = self.db.begin().await?;

        if !cart_repository::remove_item_from_cart(&txn, cart_id, product_id).await? {
            return Err(ServiceError::NotFound(ITEM_NOT_IN_CART.to_string()));
        }

        let cart = Self::load_cart(&txn, cart_id).await?;
        txn.commit().await?;

        info!(cart_id, product_id, "Removed item from cart");

        Ok(cart)
    }

    /// Sets the quantity of an existing cart line.
    ///
    /// # Errors
    ///
    /// * `ServiceError::BadRequest` - Line or product missing, or not enough stock
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        cart_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<CartWithItems, ServiceError> {
        let txn = self.db.begin().await?;

        cart_repository::update_cart_item_quantity(&txn, cart_id, product_id, quantity)
            .await?
            .map_err(|reason| Self::reject(reason, CANNOT_UPDATE_QUANTITY))?;

        let cart = Self::load_cart(&txn, cart_id).await?;
        txn.commit().await?;

        info!(cart_id, product_id, quantity, "Updated cart item quantity");

        Ok(cart)
    }

    async fn load_cart(
        txn: &DatabaseTransaction,
        cart_id: i32,
    ) -> Result<CartWithItems, ServiceError> {
        cart_repository::get_cart(txn, cart_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(CART_NOT_FOUND.to_string()))
    }

    fn reject(reason: CartRejection, message: &str) -> ServiceError {
        warn!(%reason, "Cart change rejected");
        ServiceError::BadRequest(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{
        product_repository::{create_product, get_product, NewProduct},
        test_support::migrated_db,
    };
    use assert_matches::assert_matches;

    struct Fixture {
        service: CartService,
        db: Arc<DatabaseConnection>,
    }

    async fn fixture() -> Fixture {
        let db = Arc::new(migrated_db().await);
        Fixture {
            service: CartService::new(db.clone()),
            db,
        }
    }

    async fn product(db: &DatabaseConnection, stock: i32) -> i32 {
        create_product(
            db,
            NewProduct {
                name: "Mug".into(),
                price: 7.5,
                description: Some("Ceramic".into()),
                stock,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn missing_cart_maps_to_not_found() {
        let fx = fixture().await;
        assert_matches!(
            fx.service.get_cart(1).await,
            Err(ServiceError::NotFound(msg)) if msg == CART_NOT_FOUND
        );
    }

    #[tokio::test]
    async fn add_returns_updated_cart_with_products() {
        let fx = fixture().await;
        let cart = fx.service.create_cart().await.unwrap();
        let product_id = product(&fx.db, 5).await;

        let updated = fx.service.add_item(cart.cart.id, product_id, 2).await.unwrap();
        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.items[0].item.quantity, 2);
        assert_eq!(updated.items[0].product.name, "Mug");
    }

    #[tokio::test]
    async fn add_rejections_use_fixed_message() {
        let fx = fixture().await;
        let cart = fx.service.create_cart().await.unwrap();
        let product_id = product(&fx.db, 5).await;

        assert_matches!(
            fx.service.add_item(cart.cart.id, product_id, 6).await,
            Err(ServiceError::BadRequest(msg)) if msg == CANNOT_ADD_ITEM
        );
        assert_matches!(
            fx.service.add_item(cart.cart.id, 9999, 1).await,
            Err(ServiceError::BadRequest(msg)) if msg == CANNOT_ADD_ITEM
        );
        assert_matches!(
            fx.service.add_item(cart.cart.id + 1, product_id, 1).await,
            Err(ServiceError::BadRequest(_))
        );
    }

    #[tokio::test]
    async fn remove_missing_line_maps_to_not_found() {
        let fx = fixture().await;
        let cart = fx.service.create_cart().await.unwrap();
        let product_id = product(&fx.db, 5).await;

        assert_matches!(
            fx.service.remove_item(cart.cart.id, product_id).await,
            Err(ServiceError::NotFound(msg)) if msg == ITEM_NOT_IN_CART
        );
    }

    #[tokio::test]
    async fn update_beyond_stock_is_rejected_and_rolled_back() {
        let fx = fixture().await;
        let cart = fx.service.create_cart().await.unwrap();
        let product_id = product(&fx.db, 5).await;
        fx.service.add_item(cart.cart.id, product_id, 3).await.unwrap();

        assert_matches!(
            fx.service.update_quantity(cart.cart.id, product_id, 6).await,
            Err(ServiceError::BadRequest(msg)) if msg == CANNOT_UPDATE_QUANTITY
        );

        let reloaded = fx.service.get_cart(cart.cart.id).await.unwrap();
        assert_eq!(reloaded.items[0].item.quantity, 3);

        let stock = get_product(&*fx.db, product_id).await.unwrap().unwrap().stock;
        assert_eq!(stock, 5);
    }
}
