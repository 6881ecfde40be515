use super::{Change, CommitReceipt, Database, StoreError};
use crate::models::product::Product;
use std::collections::BTreeMap;
use tokio::sync::Mutex as AsyncMutex;

/// A process-local [Database]. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    state: AsyncMutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<i32, Product>,
    last_id: i32,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[mediator::async_trait]
impl Database for MemoryDatabase {
    async fn fetch_all(&self) -> Result<Vec<Product>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn fetch_one(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.rows.get(&id).cloned())
    }

    async fn commit(&self, changes: &[Change]) -> Result<CommitReceipt, StoreError> {
        let mut state = self.state.lock().await;

        // Check everything before touching the rows so a failed commit writes nothing.
        for change in changes {
            if let Change::Update(product) = change {
                if !state.rows.contains_key(&product.id) {
                    return Err(StoreError::RowMissing(product.id));
                }
            }
        }

        let mut receipt = CommitReceipt::default();

        for change in changes {
            match change {
                Change::Insert(entry, product) => {
                    state.last_id += 1;
                    let id = state.last_id;
                    state.rows.insert(id, product.clone().with_id(id));
                    receipt.inserted.push((*entry, id));
                }
                Change::Update(product) => {
                    state.rows.insert(product.id, product.clone());
                }
            }

            receipt.affected += 1;
        }

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EntryId;
    use crate::models::product::NewProduct;

    fn named(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn commit_test() {
        let database = MemoryDatabase::new();

        let receipt = database
            .commit(&[
                Change::Insert(EntryId(0), named("Pen")),
                Change::Insert(EntryId(1), named("Ink")),
            ])
            .await
            .unwrap();

        assert_eq!(receipt.affected, 2);
        assert_eq!(receipt.inserted, vec![(EntryId(0), 1), (EntryId(1), 2)]);

        let mut ink = database.fetch_one(2).await.unwrap().unwrap();
        ink.rate = 3.0;
        database.commit(&[Change::Update(ink.clone())]).await.unwrap();

        assert_eq!(database.fetch_one(2).await.unwrap(), Some(ink));
        assert_eq!(database.fetch_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn commit_is_atomic_test() {
        let database = MemoryDatabase::new();

        let err = database
            .commit(&[
                Change::Insert(EntryId(0), named("Pen")),
                Change::Update(named("Ghost").with_id(9)),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::RowMissing(9)));
        assert!(database.fetch_all().await.unwrap().is_empty());

        // The failed commit must not burn an id.
        let receipt = database
            .commit(&[Change::Insert(EntryId(1), named("Pen"))])
            .await
            .unwrap();
        assert_eq!(receipt.inserted, vec![(EntryId(1), 1)]);
    }
}
