use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of the product catalog. `id` is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub barcode: String,
    pub description: String,
    pub is_active: bool,
    pub rate: f64,
    pub buying_price: f64,
}

/// Field values of a product that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewProduct {
    pub name: String,
    pub barcode: String,
    pub description: String,
    pub is_active: bool,
    pub rate: f64,
    pub buying_price: f64,
}

impl NewProduct {
    pub fn with_id(self, id: i32) -> Product {
        Product {
            id,
            name: self.name,
            barcode: self.barcode,
            description: self.description,
            is_active: self.is_active,
            rate: self.rate,
            buying_price: self.buying_price,
        }
    }
}
