pub mod create_product;
pub mod delete_product_by_id;
pub mod update_product;

pub use create_product::*;
pub use delete_product_by_id::*;
pub use update_product::*;
