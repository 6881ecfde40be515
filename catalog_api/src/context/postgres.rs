use super::{Change, CommitReceipt, Database, StoreError};
use crate::models::product::Product;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

const CREATE_PRODUCTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        barcode TEXT NOT NULL,
        description TEXT NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT FALSE,
        rate DOUBLE PRECISION NOT NULL,
        buying_price DOUBLE PRECISION NOT NULL
    )
"#;

const SELECT_PRODUCTS: &str =
    "SELECT id, name, barcode, description, is_active, rate, buying_price FROM products";

/// A PostgreSQL [Database]. Every commit runs in its own transaction.
#[derive(Debug, Clone)]
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        Ok(PgDatabase { pool })
    }

    /// Creates the `products` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_PRODUCTS_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        barcode: row.try_get("barcode")?,
        description: row.try_get("description")?,
        is_active: row.try_get("is_active")?,
        rate: row.try_get("rate")?,
        buying_price: row.try_get("buying_price")?,
    })
}

#[mediator::async_trait]
impl Database for PgDatabase {
    async fn fetch_all(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(&format!("{} ORDER BY id", SELECT_PRODUCTS))
            .fetch_all(&self.pool)
            .await?;

        let products = rows
            .iter()
            .map(product_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    async fn fetch_one(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_PRODUCTS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(product_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn commit(&self, changes: &[Change]) -> Result<CommitReceipt, StoreError> {
        // Returning early drops the transaction, which rolls it back.
        let mut tx = self.pool.begin().await?;
        let mut receipt = CommitReceipt::default();

        for change in changes {
            match change {
                Change::Insert(entry, product) => {
                    let row = sqlx::query(
                        r#"
                        INSERT INTO products (name, barcode, description, is_active, rate, buying_price)
                        VALUES ($1, $2, $3, $4, $5, $6)
                        RETURNING id
                        "#,
                    )
                    .bind(&product.name)
                    .bind(&product.barcode)
                    .bind(&product.description)
                    .bind(product.is_active)
                    .bind(product.rate)
                    .bind(product.buying_price)
                    .fetch_one(&mut *tx)
                    .await?;

                    let id: i32 = row.try_get("id")?;
                    receipt.inserted.push((*entry, id));
                }
                Change::Update(product) => {
                    let result = sqlx::query(
                        r#"
                        UPDATE products
                        SET name = $2, barcode = $3, description = $4, is_active = $5,
                            rate = $6, buying_price = $7
                        WHERE id = $1
                        "#,
                    )
                    .bind(product.id)
                    .bind(&product.name)
                    .bind(&product.barcode)
                    .bind(&product.description)
                    .bind(product.is_active)
                    .bind(product.rate)
                    .bind(product.buying_price)
                    .execute(&mut *tx)
                    .await?;

                    if result.rows_affected() == 0 {
                        return Err(StoreError::RowMissing(product.id));
                    }
                }
            }

            receipt.affected += 1;
        }

        tx.commit().await?;
        Ok(receipt)
    }
}
