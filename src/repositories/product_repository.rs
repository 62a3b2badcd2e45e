use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    ModelTrait, QueryOrder, Set,
};

use crate::entities::commerce::product::{self, Entity as Product, Model as ProductModel};

/// Fields of a product about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub stock: i32,
}

/// Partial update of a product. `None` leaves the column untouched;
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<Option<String>>,
    pub stock: Option<i32>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.stock.is_none()
    }
}

pub async fn get_product<C>(conn: &C, product_id: i32) -> Result<Option<ProductModel>, DbErr>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id).one(conn).await
}

/// All products in primary key order.
pub async fn get_products<C>(conn: &C) -> Result<Vec<ProductModel>, DbErr>
where
    C: ConnectionTrait,
{
    Product::find()
        .order_by_asc(product::Column::Id)
        .all(conn)
        .await
}

pub async fn create_product<C>(conn: &C, new_product: NewProduct) -> Result<ProductModel, DbErr>
where
    C: ConnectionTrait,
{
    product::ActiveModel {
        id: NotSet,
        name: Set(new_product.name),
        price: Set(new_product.price),
        description: Set(new_product.description),
        stock: Set(new_product.stock),
    }
    .insert(conn)
    .await
}

/// Applies `changes` to an existing product and returns the refreshed row,
/// or `None` when the id is unknown.
pub async fn update_product<C>(
    conn: &C,
    product_id: i32,
    changes: ProductChanges,
) -> Result<Option<ProductModel>, DbErr>
where
    C: ConnectionTrait,
{
    let Some(existing) = get_product(conn, product_id).await? else {
        return Ok(None);
    };

    if changes.is_empty() {
        return Ok(Some(existing));
    }

    let mut active = existing.into_active_model();
    if let Some(name) = changes.name {
        active.name = Set(name);
    }
    if let Some(price) = changes.price {
        active.price = Set(price);
    }
    if let Some(description) = changes.description {
        active.description = Set(description);
    }
    if let Some(stock) = changes.stock {
        active.stock = Set(stock);
    }

    active.update(conn).await.map(Some)
}

/// Deletes a product and returns its last-known state, or `None` when the id
/// is unknown. Cart lines pointing at it are removed by the foreign key cascade.
pub async fn delete_product<C>(conn: &C, product_id: i32) -> Result<Option<ProductModel>, DbErr>
where
    C: ConnectionTrait,
{
    let Some(existing) = get_product(conn, product_id).await? else {
        return Ok(None);
    };

    existing.clone().delete(conn).await?;
    Ok(Some(existing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::migrated_db;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".into(),
            price: 9.99,
            description: Some("A widget".into()),
            stock: 10,
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let db = migrated_db().await;

        let created = create_product(&db, widget()).await.unwrap();
        let fetched = get_product(&db, created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Widget");
        assert_eq!(fetched.price, 9.99);
        assert_eq!(fetched.description.as_deref(), Some("A widget"));
        assert_eq!(fetched.stock, 10);
    }

    #[tokio::test]
    async fn unknown_product_is_absent() {
        let db = migrated_db().await;
        assert!(get_product(&db, 9999).await.unwrap().is_none());
        assert!(update_product(&db, 9999, ProductChanges::default())
            .await
            .unwrap()
            .is_none());
        assert!(delete_product(&db, 9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_products_is_ordered_by_id() {
        let db = migrated_db().await;
        let first = create_product(&db, widget()).await.unwrap();
        let second = create_product(
            &db,
            NewProduct {
                name: "Gadget".into(),
                ..widget()
            },
        )
        .await
        .unwrap();

        let ids: Vec<i32> = get_products(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn update_applies_only_provided_fields() {
        let db = migrated_db().await;
        let created = create_product(&db, widget()).await.unwrap();

        let updated = update_product(
            &db,
            created.id,
            ProductChanges {
                price: Some(12.5),
                stock: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.description.as_deref(), Some("A widget"));
        assert_eq!(updated.price, 12.5);
        assert_eq!(updated.stock, 3);
    }

    #[tokio::test]
    async fn update_can_clear_description() {
        let db = migrated_db().await;
        let created = create_product(&db, widget()).await.unwrap();

        let updated = update_product(
            &db,
            created.id,
            ProductChanges {
                description: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert!(updated.description.is_none());
    }

    #[tokio::test]
    async fn delete_returns_last_state_and_removes_row() {
        let db = migrated_db().await;
        let created = create_product(&db, widget()).await.unwrap();

        let deleted = delete_product(&db, created.id).await.unwrap().unwrap();
        assert_eq!(deleted, created);
        assert!(get_product(&db, created.id).await.unwrap().is_none());
    }
}
