//! Data-access functions over the commerce tables.
//!
//! Every function takes any [`sea_orm::ConnectionTrait`] so it can run against the
//! pool directly or inside a caller-owned transaction. Absence is `None`/`false`;
//! only database failures surface as `Err(DbErr)`.

pub mod cart_repository;
pub mod product_repository;

pub use cart_repository::{AddItemOutcome, CartLine, CartRejection, CartWithItems};
pub use product_repository::{NewProduct, ProductChanges};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::db::{establish_connection_with_config, run_migrations, DbConfig};
    use sea_orm::DatabaseConnection;

    /// Fresh, migrated in-memory SQLite database.
    pub async fn migrated_db() -> DatabaseConnection {
        let db = establish_connection_with_config(&DbConfig::in_memory_sqlite())
            .await
            .unwrap();
        run_migrations(&db).await.unwrap();
        db
    }
}
