pub mod commerce;
pub mod common;

use crate::db::DbPool;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub product: Arc<crate::services::commerce::ProductService>,
    pub cart: Arc<crate::services::commerce::CartService>,
}

impl AppServices {
    /// Build the service container over a shared connection pool.
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            product: Arc::new(crate::services::commerce::ProductService::new(
                db_pool.clone(),
            )),
            cart: Arc::new(crate::services::commerce::CartService::new(db_pool)),
        }
    }
}
