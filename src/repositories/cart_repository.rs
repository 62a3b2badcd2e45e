use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, Set,
};
use thiserror::Error;

use crate::entities::commerce::{
    cart::{self, Entity as Cart, Model as CartModel},
    cart_item::{self, Entity as CartItem, Model as CartItemModel},
    product::{Entity as Product, Model as ProductModel},
};

/// One cart line with its product loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: CartItemModel,
    pub product: ProductModel,
}

/// A cart together with its lines, ordered by line id.
#[derive(Debug, Clone, PartialEq)]
pub struct CartWithItems {
    pub cart: CartModel,
    pub items: Vec<CartLine>,
}

impl CartWithItems {
    pub fn line_for(&self, product_id: i32) -> Option<&CartLine> {
        self.items
            .iter()
            .find(|line| line.item.product_id == product_id)
    }
}

/// Why a stock-checked cart mutation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartRejection {
    #[error("cart does not exist")]
    CartNotFound,
    #[error("product does not exist")]
    ProductNotFound,
    #[error("product is not in the cart")]
    LineNotFound,
    #[error("requested {requested} but only {available} in stock")]
    InsufficientStock { requested: i32, available: i32 },
}

/// Result of adding to or re-quantifying a cart line.
pub type AddItemOutcome = Result<CartItemModel, CartRejection>;

/// Loads a cart and its lines, or `None` when the cart does not exist.
pub async fn get_cart<C>(conn: &C, cart_id: i32) -> Result<Option<CartWithItems>, DbErr>
where
    C: ConnectionTrait,
{
    let Some(cart) = Cart::find_by_id(cart_id).one(conn).await? else {
        return Ok(None);
    };

    let rows = CartItem::find()
        .filter(cart_item::Column::CartId.eq(cart_id))
        .order_by_asc(cart_item::Column::Id)
        .find_also_related(Product)
        .all(conn)
        .await?;

    let items = rows
        .into_iter()
        .map(|(item, product)| match product {
            Some(product) => Ok(CartLine { item, product }),
            None => Err(DbErr::RecordNotFound(format!(
                "product {} referenced by cart line {}",
                item.product_id, item.id
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(CartWithItems { cart, items }))
}

pub async fn create_cart<C>(conn: &C) -> Result<CartModel, DbErr>
where
    C: ConnectionTrait,
{
    cart::ActiveModel {
        id: NotSet,
        created_at: Set(Utc::now()),
    }
    .insert(conn)
    .await
}

async fn find_line<C>(conn: &C, cart_id: i32, product_id: i32) -> Result<Option<CartItemModel>, DbErr>
where
    C: ConnectionTrait,
{
    CartItem::find()
        .filter(cart_item::Column::CartId.eq(cart_id))
        .filter(cart_item::Column::ProductId.eq(product_id))
        .one(conn)
        .await
}

fn check_stock(product: &ProductModel, requested: i32) -> Result<(), CartRejection> {
    if product.can_supply(requested) {
        Ok(())
    } else {
        Err(CartRejection::InsufficientStock {
            requested,
            available: product.stock,
        })
    }
}

/// Adds `quantity` units of a product to a cart.
///
/// An existing line for the product is merged into; the merged total must
/// still fit in stock. Stock itself is left untouched.
pub async fn add_item_to_cart<C>(
    conn: &C,
    cart_id: i32,
    product_id: i32,
    quantity: i32,
) -> Result<AddItemOutcome, DbErr>
where
    C: ConnectionTrait,
{
    if Cart::find_by_id(cart_id).one(conn).await?.is_none() {
        return Ok(Err(CartRejection::CartNotFound));
    }

    let Some(product) = Product::find_by_id(product_id).one(conn).await? else {
        return Ok(Err(CartRejection::ProductNotFound));
    };
    if let Err(rejection) = check_stock(&product, quantity) {
        return Ok(Err(rejection));
    }

    let line = match find_line(conn, cart_id, product_id).await? {
        Some(existing) => {
            let total = existing.quantity.saturating_add(quantity);
            if let Err(rejection) = check_stock(&product, total) {
                return Ok(Err(rejection));
            }
            let mut active = existing.into_active_model();
            active.quantity = Set(total);
            active.update(conn).await?
        }
        None => {
            cart_item::ActiveModel {
                id: NotSet,
                cart_id: Set(cart_id),
                product_id: Set(product_id),
                quantity: Set(quantity),
            }
            .insert(conn)
            .await?
        }
    };

    Ok(Ok(line))
}

/// Deletes the line for `product_id`; `false` when the cart holds no such line.
pub async fn remove_item_from_cart<C>(conn: &C, cart_id: i32, product_id: i32) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    match find_line(conn, cart_id, product_id).await? {
        Some(line) => {
            line.delete(conn).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Sets the quantity of an existing line, provided stock covers it.
pub async fn update_cart_item_quantity<C>(
    conn: &C,
    cart_id: i32,
    product_id: i32,
    quantity: i32,
) -> Result<AddItemOutcome, DbErr>
where
    C: ConnectionTrait,
{
    let Some(line) = find_line(conn, cart_id, product_id).await? else {
        return Ok(Err(CartRejection::LineNotFound));
    };

    let Some(product) = Product::find_by_id(product_id).one(conn).await? else {
        return Ok(Err(CartRejection::ProductNotFound));
    };
    if let Err(rejection) = check_stock(&product, quantity) {
        return Ok(Err(rejection));
    }

    let mut active = line.into_active_model();
    active.quantity = Set(quantity);
    active.update(conn).await.map(Ok)
}
