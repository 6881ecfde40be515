pub mod get_all_products;
pub mod get_product_by_id;

pub use get_all_products::*;
pub use get_product_by_id::*;
