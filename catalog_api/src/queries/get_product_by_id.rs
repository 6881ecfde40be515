use crate::context::RequestScope;
use crate::error::Result;
use crate::models::product::Product;
use mediator::{CancellationToken, Request, RequestHandler};

pub struct GetProductByIdQuery {
    pub id: i32,
}

impl Request<Result<Option<Product>>> for GetProductByIdQuery {}

pub struct GetProductByIdQueryHandler;

#[mediator::async_trait]
impl RequestHandler<GetProductByIdQuery, Result<Option<Product>>, RequestScope>
    for GetProductByIdQueryHandler
{
    async fn handle(
        &self,
        query: GetProductByIdQuery,
        context: &mut RequestScope,
        _: CancellationToken,
    ) -> Result<Option<Product>> {
        let product = context.products().find(query.id).await?;
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{DbContext, MemoryDatabase};
    use crate::models::product::NewProduct;
    use std::sync::Arc;

    #[tokio::test]
    async fn get_product_by_id_test() {
        let mut context = DbContext::new(Arc::new(MemoryDatabase::new()));
        let scope: &mut RequestScope = &mut context;

        let entry = scope.products().add(NewProduct {
            name: "Pen".to_owned(),
            ..Default::default()
        });
        scope.save_changes().await.unwrap();
        let id = scope.products().key_of(entry).unwrap();

        let found = GetProductByIdQueryHandler
            .handle(GetProductByIdQuery { id }, &mut *scope, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(found.map(|p| p.name), Some("Pen".to_owned()));

        let missing = GetProductByIdQueryHandler
            .handle(GetProductByIdQuery { id: id + 1 }, &mut *scope, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(missing, None);
    }
}
