// Commerce services: product catalog and the shopping cart
pub mod commerce;

pub use commerce::{CartService, ProductService};
