//! The entity store.
//!
//! A [DbContext] is opened for every inbound request. Reads go straight to the
//! [Database]; writes are staged on the [ProductSet] and only reach the
//! database when [ApplicationContext::save_changes] commits them all at once.
//! Dropping a context discards whatever it did not commit.

mod memory;
mod postgres;

pub use memory::MemoryDatabase;
pub use postgres::PgDatabase;

use crate::models::product::{NewProduct, Product};
use std::collections::HashMap;
use std::sync::Arc;

pub type SharedDatabase = Arc<dyn Database>;

/// The scope every handler receives: one context per inbound request.
pub type RequestScope = dyn ApplicationContext;

/// Failures raised by the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no product with id {0}")]
    RowMissing(i32),

    #[error("the store assigned no id to {0:?}")]
    KeyNotAssigned(EntryId),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Identifies a product staged with [ProductSet::add] until the store assigns its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

/// A pending write.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Insert(EntryId, NewProduct),
    Update(Product),
}

/// Outcome of a successful commit.
#[derive(Debug, Default, PartialEq)]
pub struct CommitReceipt {
    /// Number of rows inserted or updated.
    pub affected: usize,
    /// Ids assigned to the inserted entries.
    pub inserted: Vec<(EntryId, i32)>,
}

/// Backend holding the product rows.
#[mediator::async_trait]
pub trait Database: Send + Sync {
    /// Every product, ordered by id.
    async fn fetch_all(&self) -> Result<Vec<Product>, StoreError>;

    async fn fetch_one(&self, id: i32) -> Result<Option<Product>, StoreError>;

    /// Applies all the changes or none of them.
    async fn commit(&self, changes: &[Change]) -> Result<CommitReceipt, StoreError>;
}

/// The product collection of a context: queries plus the writes staged on it.
pub struct ProductSet {
    database: SharedDatabase,
    pending: Vec<Change>,
    next_entry: u64,
    keys: HashMap<EntryId, i32>,
}

impl ProductSet {
    fn new(database: SharedDatabase) -> Self {
        ProductSet {
            database,
            pending: Vec::new(),
            next_entry: 0,
            keys: HashMap::new(),
        }
    }

    /// Loads every committed product.
    pub async fn to_list(&self) -> Result<Vec<Product>, StoreError> {
        self.database.fetch_all().await
    }

    /// Loads the committed product with the given id.
    pub async fn find(&self, id: i32) -> Result<Option<Product>, StoreError> {
        self.database.fetch_one(id).await
    }

    /// Stages a new product. Its id is known after the next commit, see [ProductSet::key_of].
    pub fn add(&mut self, product: NewProduct) -> EntryId {
        let entry = EntryId(self.next_entry);
        self.next_entry += 1;
        self.pending.push(Change::Insert(entry, product));
        entry
    }

    /// Stages new field values for an existing product.
    pub fn update(&mut self, product: Product) {
        self.pending.push(Change::Update(product));
    }

    /// Id the store assigned to a committed entry.
    pub fn key_of(&self, entry: EntryId) -> Option<i32> {
        self.keys.get(&entry).copied()
    }

    pub fn has_changes(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// The store abstraction handlers work against.
#[mediator::async_trait]
pub trait ApplicationContext: Send {
    fn products(&mut self) -> &mut ProductSet;

    /// Commits every staged change and returns the number of affected rows.
    /// On failure nothing is written and the changes stay staged.
    async fn save_changes(&mut self) -> Result<usize, StoreError>;
}

/// Request-scoped [ApplicationContext] over a shared [Database].
pub struct DbContext {
    database: SharedDatabase,
    products: ProductSet,
}

impl DbContext {
    pub fn new(database: SharedDatabase) -> Self {
        DbContext {
            products: ProductSet::new(database.clone()),
            database,
        }
    }
}

#[mediator::async_trait]
impl ApplicationContext for DbContext {
    fn products(&mut self) -> &mut ProductSet {
        &mut self.products
    }

    async fn save_changes(&mut self) -> Result<usize, StoreError> {
        if !self.products.has_changes() {
            return Ok(0);
        }

        let receipt = self.database.commit(&self.products.pending).await?;
        log::debug!(
            "Committed {} change(s), {} row(s) affected",
            self.products.pending.len(),
            receipt.affected
        );

        self.products.pending.clear();
        self.products.keys.extend(receipt.inserted);
        Ok(receipt.affected)
    }
}
