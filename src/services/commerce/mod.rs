/// Commerce services module - product catalog and cart workflow
pub mod cart_service;
pub mod product_service;

// Re-export services for convenience
pub use cart_service::CartService;
pub use product_service::ProductService;
