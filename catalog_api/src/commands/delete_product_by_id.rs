use crate::context::RequestScope;
use crate::error::{CatalogError, Result};
use mediator::{CancellationToken, Request, RequestHandler};

pub struct DeleteProductByIdCommand {
    pub id: i32,
}

impl Request<Result<i32>> for DeleteProductByIdCommand {}

/// Deleting products is not supported: every request fails and the store is left untouched.
pub struct DeleteProductByIdCommandHandler;

#[mediator::async_trait]
impl RequestHandler<DeleteProductByIdCommand, Result<i32>, RequestScope>
    for DeleteProductByIdCommandHandler
{
    async fn handle(
        &self,
        command: DeleteProductByIdCommand,
        _: &mut RequestScope,
        _: CancellationToken,
    ) -> Result<i32> {
        log::warn!("Refused to delete product {}", command.id);
        Err(CatalogError::NotImplemented("DeleteProductByIdCommand"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{DbContext, MemoryDatabase, SharedDatabase};
    use crate::models::product::NewProduct;
    use std::sync::Arc;

    #[tokio::test]
    async fn delete_always_fails_test() {
        let database: SharedDatabase = Arc::new(MemoryDatabase::new());
        let mut context = DbContext::new(database.clone());
        let scope: &mut RequestScope = &mut context;

        scope.products().add(NewProduct::default());
        scope.save_changes().await.unwrap();

        for id in [1, 2, -1] {
            let res = DeleteProductByIdCommandHandler
                .handle(DeleteProductByIdCommand { id }, &mut *scope, CancellationToken::new())
                .await;

            assert!(matches!(res, Err(CatalogError::NotImplemented(_))));
        }

        assert!(!scope.products().has_changes());
        assert_eq!(database.fetch_all().await.unwrap().len(), 1);
    }
}
