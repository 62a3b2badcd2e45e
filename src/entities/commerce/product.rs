use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog product. `stock` is checked by cart operations but never decremented.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub price: f64,
    #[sea_orm(nullable)]
    pub description: Option<String>,
    pub stock: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether `quantity` units can be held by a single cart line.
    pub fn can_supply(&self, quantity: i32) -> bool {
        self.stock >= quantity
    }
}
